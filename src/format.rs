//! Display formatting for the en-IN locale
//!
//! Amounts are grouped the Indian way (`12,34,567`): the last three digits
//! form one group and every group above it has two digits.

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Group an integer using en-IN digit grouping
pub fn group_en_in(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Format a rupee amount for display, floored to whole rupees
pub fn format_rupees(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹ -".to_string();
    }
    let floored = amount.floor();
    let sign = if floored < 0.0 { "-" } else { "" };
    format!("₹ {}{}", sign, group_en_in(floored.abs() as u64))
}

/// Plain number without a trailing `.0`
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Short rupee label used in bound messages (`₹10 K`, `₹5 Lacs`, `₹50 Cr`)
pub fn compact_rupees(amount: f64) -> String {
    if amount >= CRORE {
        format!("₹{} Cr", format_number(amount / CRORE))
    } else if amount >= LAKH {
        format!("₹{} Lacs", format_number(amount / LAKH))
    } else if amount >= 10.0 * THOUSAND {
        format!("₹{} K", format_number(amount / THOUSAND))
    } else {
        format!("₹{}", group_en_in(amount.max(0.0).round() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_en_in() {
        assert_eq!(group_en_in(0), "0");
        assert_eq!(group_en_in(999), "999");
        assert_eq!(group_en_in(1000), "1,000");
        assert_eq!(group_en_in(12000), "12,000");
        assert_eq!(group_en_in(123456), "1,23,456");
        assert_eq!(group_en_in(1234567), "12,34,567");
        assert_eq!(group_en_in(500000000), "50,00,00,000");
    }

    #[test]
    fn test_format_rupees_floors() {
        assert_eq!(format_rupees(12330.99), "₹ 12,330");
        assert_eq!(format_rupees(73466.40), "₹ 73,466");
        assert_eq!(format_rupees(0.0), "₹ 0");
        assert_eq!(format_rupees(f64::NAN), "₹ -");
    }

    #[test]
    fn test_compact_labels() {
        assert_eq!(compact_rupees(500.0), "₹500");
        assert_eq!(compact_rupees(1000.0), "₹1,000");
        assert_eq!(compact_rupees(10_000.0), "₹10 K");
        assert_eq!(compact_rupees(50_000.0), "₹50 K");
        assert_eq!(compact_rupees(500_000.0), "₹5 Lacs");
        assert_eq!(compact_rupees(1_000_000.0), "₹10 Lacs");
        assert_eq!(compact_rupees(500_000_000.0), "₹50 Cr");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(40.0), "40");
        assert_eq!(format_number(7.5), "7.5");
    }
}
