//! Numeric field identifiers and bounds

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::format::{compact_rupees, format_number};

/// Identifies a user-adjustable quantity within a calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    MonthlyInvestment,
    TotalInvestment,
    WithdrawalPerMonth,
    ExpectedReturn,
    TimePeriod,
}

impl FieldId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::MonthlyInvestment => "monthly_investment",
            FieldId::TotalInvestment => "total_investment",
            FieldId::WithdrawalPerMonth => "withdrawal_per_month",
            FieldId::ExpectedReturn => "expected_return",
            FieldId::TimePeriod => "time_period",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "monthly_investment" => Ok(FieldId::MonthlyInvestment),
            "total_investment" => Ok(FieldId::TotalInvestment),
            "withdrawal_per_month" => Ok(FieldId::WithdrawalPerMonth),
            "expected_return" => Ok(FieldId::ExpectedReturn),
            "time_period" => Ok(FieldId::TimePeriod),
            other => Err(other.to_string()),
        }
    }
}

/// Unit of a field, used for bound labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldUnit {
    Rupees,
    Percent,
    Years,
}

/// Bounds and text rules for one numeric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Soft floor: values below it are kept but flagged
    pub min: f64,

    /// Hard ceiling: values above it are clamped
    pub max: f64,

    /// Slider granularity
    pub step: f64,

    /// Whether a single decimal point is accepted
    pub allow_decimal: bool,

    /// Maximum characters the text box accepts
    pub max_text_length: usize,

    pub unit: FieldUnit,

    /// Value when the calculator screen mounts
    pub default: f64,
}

impl FieldConfig {
    pub fn rupees(min: f64, max: f64, step: f64, max_text_length: usize, default: f64) -> Self {
        Self {
            min,
            max,
            step,
            allow_decimal: false,
            max_text_length,
            unit: FieldUnit::Rupees,
            default,
        }
    }

    /// Annual return rate in percent, 0 to `max` in half-percent steps
    pub fn percent(max: f64, default: f64) -> Self {
        Self {
            min: 0.0,
            max,
            step: 0.5,
            allow_decimal: true,
            max_text_length: 5,
            unit: FieldUnit::Percent,
            default,
        }
    }

    /// Horizon in whole years, 1 to `max`
    pub fn years(max: f64, default: f64) -> Self {
        Self {
            min: 1.0,
            max,
            step: 1.0,
            allow_decimal: false,
            max_text_length: 3,
            unit: FieldUnit::Years,
            default,
        }
    }

    /// Human label for a bound value in this field's unit
    pub fn label(&self, value: f64) -> String {
        match self.unit {
            FieldUnit::Rupees => compact_rupees(value),
            FieldUnit::Percent => format!("{}%", format_number(value)),
            FieldUnit::Years => format!("{} Yr", format_number(value)),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into range and align to `min + k * step`, as a slider would emit
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).min(self.max)
    }

    /// Check internal consistency of the bounds
    pub fn validate(&self) -> Result<(), String> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err("bounds must be finite".to_string());
        }
        if self.min < 0.0 {
            return Err(format!("min {} is negative", self.min));
        }
        if self.min > self.max {
            return Err(format!("min {} exceeds max {}", self.min, self.max));
        }
        if self.step <= 0.0 {
            return Err(format!("step {} must be positive", self.step));
        }
        if self.max_text_length == 0 {
            return Err("max_text_length must be at least 1".to_string());
        }
        if !self.default.is_finite() || !self.contains(self.default) {
            return Err(format!("default {} outside [{}, {}]", self.default, self.min, self.max));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_step() {
        let rate = FieldConfig::percent(30.0, 5.0);
        assert_eq!(rate.snap(7.3), 7.5);
        assert_eq!(rate.snap(-2.0), 0.0);
        assert_eq!(rate.snap(99.0), 30.0);

        let money = FieldConfig::rupees(500.0, 500_000.0, 500.0, 8, 1_000.0);
        assert_eq!(money.snap(1_240.0), 1_000.0);
        assert_eq!(money.snap(1_260.0), 1_500.0);
        assert_eq!(money.snap(f64::NAN), 500.0);
    }

    #[test]
    fn test_labels() {
        let years = FieldConfig::years(100.0, 5.0);
        assert_eq!(years.label(100.0), "100 Yr");
        let rate = FieldConfig::percent(40.0, 8.0);
        assert_eq!(rate.label(40.0), "40%");
        let money = FieldConfig::rupees(50_000.0, 500_000_000.0, 10_000.0, 10, 50_000.0);
        assert_eq!(money.label(money.min), "₹50 K");
        assert_eq!(money.label(money.max), "₹50 Cr");
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let mut config = FieldConfig::years(60.0, 1.0);
        config.min = 70.0;
        assert!(config.validate().is_err());

        let mut config = FieldConfig::years(60.0, 1.0);
        config.step = 0.0;
        assert!(config.validate().is_err());
    }
}
