//! Keystroke normalization for numeric fields
//!
//! Policy per field:
//! - empty or unparseable text resets the value to 0 with no message
//! - below `min` keeps the typed value and flags it (soft floor)
//! - above `max` clamps to `max` and flags it; the flag clears itself later

use crate::error::FieldError;
use crate::format::format_number;
use crate::instruments::FieldConfig;

/// Outcome of normalizing one text edit
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// Edit refused (more than one decimal point); prior state is kept
    Rejected,
    Accepted {
        /// Text the input box should now show
        text: String,
        value: f64,
        error: Option<FieldError>,
    },
}

impl Normalized {
    fn cleared() -> Self {
        Normalized::Accepted {
            text: String::new(),
            value: 0.0,
            error: None,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Normalized::Rejected => None,
            Normalized::Accepted { value, .. } => Some(*value),
        }
    }

    pub fn error(&self) -> Option<&FieldError> {
        match self {
            Normalized::Rejected => None,
            Normalized::Accepted { error, .. } => error.as_ref(),
        }
    }
}

/// Strip characters the field does not accept, honouring the length limit
fn strip(raw: &str, config: &FieldConfig) -> String {
    raw.chars()
        .take(config.max_text_length)
        .filter(|c| c.is_ascii_digit() || (config.allow_decimal && *c == '.'))
        .collect()
}

/// Convert a raw text edit into a bounded value and optional message
pub fn normalize(raw: &str, config: &FieldConfig) -> Normalized {
    let cleaned = strip(raw, config);

    if config.allow_decimal && cleaned.matches('.').count() > 1 {
        return Normalized::Rejected;
    }

    if cleaned.is_empty() {
        return Normalized::cleared();
    }

    // A lone "." is the only digit-free string left after stripping
    let parsed: f64 = match cleaned.parse() {
        Ok(v) => v,
        Err(_) => return Normalized::cleared(),
    };

    if parsed < config.min {
        Normalized::Accepted {
            text: cleaned,
            value: parsed,
            error: Some(FieldError::BelowMinimum {
                bound: config.min,
                label: config.label(config.min),
            }),
        }
    } else if parsed <= config.max {
        Normalized::Accepted {
            text: cleaned,
            value: parsed,
            error: None,
        }
    } else {
        Normalized::Accepted {
            text: format_number(config.max),
            value: config.max,
            error: Some(FieldError::AboveMaximum {
                bound: config.max,
                label: config.label(config.max),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investment() -> FieldConfig {
        FieldConfig::rupees(500.0, 500_000.0, 500.0, 8, 1_000.0)
    }

    fn rate() -> FieldConfig {
        FieldConfig::percent(40.0, 8.0)
    }

    #[test]
    fn test_empty_resets_to_zero() {
        assert_eq!(normalize("", &investment()), Normalized::cleared());
        assert_eq!(normalize("", &rate()), Normalized::cleared());
        // Only junk characters is the same as empty
        assert_eq!(normalize("₹ ,", &investment()), Normalized::cleared());
    }

    #[test]
    fn test_strips_non_digits() {
        let out = normalize("₹ 2,500", &investment());
        assert_eq!(out.value(), Some(2_500.0));
        assert!(out.error().is_none());
    }

    #[test]
    fn test_below_minimum_keeps_typed_value() {
        let out = normalize("10", &investment());
        assert_eq!(out.value(), Some(10.0));
        assert_eq!(out.error().unwrap().to_string(), "Min. value allowed is ₹500");
        if let Normalized::Accepted { text, .. } = out {
            assert_eq!(text, "10");
        }
    }

    #[test]
    fn test_typing_through_minimum() {
        let config = investment();
        let steps: Vec<_> = ["1", "10", "100", "1000"].iter().map(|s| normalize(s, &config)).collect();

        assert_eq!(steps[0].value(), Some(1.0));
        assert_eq!(steps[1].value(), Some(10.0));
        assert_eq!(steps[2].value(), Some(100.0));
        assert_eq!(steps[3].value(), Some(1_000.0));
        assert!(steps[2].error().is_some());
        assert!(steps[3].error().is_none());
    }

    #[test]
    fn test_above_maximum_clamps() {
        let out = normalize("9999999", &investment());
        assert_eq!(out.value(), Some(500_000.0));
        let err = out.error().unwrap();
        assert!(err.is_self_clearing());
        assert_eq!(err.to_string(), "Max. value allowed is ₹5 Lacs");
        if let Normalized::Accepted { text, .. } = out {
            assert_eq!(text, "500000");
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let config = investment();
        assert!(normalize("500", &config).error().is_none());
        assert!(normalize("500000", &config).error().is_none());
    }

    #[test]
    fn test_decimal_rate() {
        let out = normalize("7.25", &rate());
        assert_eq!(out.value(), Some(7.25));

        let out = normalize("41", &rate());
        assert_eq!(out.value(), Some(40.0));
        assert_eq!(out.error().unwrap().to_string(), "Max. value allowed is 40%");
    }

    #[test]
    fn test_trailing_decimal_point_keeps_text() {
        let out = normalize("7.", &rate());
        assert_eq!(
            out,
            Normalized::Accepted {
                text: "7.".to_string(),
                value: 7.0,
                error: None
            }
        );
    }

    #[test]
    fn test_second_decimal_point_rejected() {
        assert_eq!(normalize("7.5.", &rate()), Normalized::Rejected);
        assert_eq!(normalize("1..", &rate()), Normalized::Rejected);
    }

    #[test]
    fn test_decimal_point_dropped_for_integer_fields() {
        let out = normalize("4.5", &FieldConfig::years(100.0, 5.0));
        assert_eq!(out.value(), Some(45.0));
    }

    #[test]
    fn test_lone_decimal_point_is_silent_zero() {
        assert_eq!(normalize(".", &rate()), Normalized::cleared());
    }

    #[test]
    fn test_text_truncated_to_max_length() {
        // Only the first 8 characters are accepted
        let out = normalize("1234567890", &investment());
        assert_eq!(out.value(), Some(500_000.0));

        let config = FieldConfig::rupees(500.0, 500_000_000.0, 500.0, 4, 1_000.0);
        assert_eq!(normalize("123456", &config).value(), Some(1_234.0));
    }
}
