//! Committed parameter sets for each instrument

use serde::{Deserialize, Serialize};

use crate::instruments::{FieldId, InstrumentKind};

/// Numeric inputs for one projection
///
/// Rates are annual percentages (`8.0` means 8% p.a.), durations are years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "instrument", rename_all = "lowercase")]
pub enum InstrumentParameters {
    Sip {
        monthly_investment: f64,
        annual_rate_pct: f64,
        years: f64,
    },
    Lumpsum {
        principal: f64,
        annual_rate_pct: f64,
        years: f64,
    },
    Swp {
        principal: f64,
        monthly_withdrawal: f64,
        annual_rate_pct: f64,
        years: f64,
    },
}

impl InstrumentParameters {
    pub fn kind(&self) -> InstrumentKind {
        match self {
            InstrumentParameters::Sip { .. } => InstrumentKind::Sip,
            InstrumentParameters::Lumpsum { .. } => InstrumentKind::Lumpsum,
            InstrumentParameters::Swp { .. } => InstrumentKind::Swp,
        }
    }

    pub fn annual_rate_pct(&self) -> f64 {
        match *self {
            InstrumentParameters::Sip { annual_rate_pct, .. }
            | InstrumentParameters::Lumpsum { annual_rate_pct, .. }
            | InstrumentParameters::Swp { annual_rate_pct, .. } => annual_rate_pct,
        }
    }

    pub fn years(&self) -> f64 {
        match *self {
            InstrumentParameters::Sip { years, .. }
            | InstrumentParameters::Lumpsum { years, .. }
            | InstrumentParameters::Swp { years, .. } => years,
        }
    }

    /// Same parameters with a different annual rate
    pub fn with_rate(self, rate_pct: f64) -> Self {
        match self {
            InstrumentParameters::Sip { monthly_investment, years, .. } => InstrumentParameters::Sip {
                monthly_investment,
                annual_rate_pct: rate_pct,
                years,
            },
            InstrumentParameters::Lumpsum { principal, years, .. } => InstrumentParameters::Lumpsum {
                principal,
                annual_rate_pct: rate_pct,
                years,
            },
            InstrumentParameters::Swp {
                principal,
                monthly_withdrawal,
                years,
                ..
            } => InstrumentParameters::Swp {
                principal,
                monthly_withdrawal,
                annual_rate_pct: rate_pct,
                years,
            },
        }
    }

    /// Build a parameter set from field values
    ///
    /// Returns `None` if `value_of` has no value for a field the instrument needs.
    pub fn from_fields<F>(kind: InstrumentKind, value_of: F) -> Option<Self>
    where
        F: Fn(FieldId) -> Option<f64>,
    {
        let annual_rate_pct = value_of(FieldId::ExpectedReturn)?;
        let years = value_of(FieldId::TimePeriod)?;

        Some(match kind {
            InstrumentKind::Sip => InstrumentParameters::Sip {
                monthly_investment: value_of(FieldId::MonthlyInvestment)?,
                annual_rate_pct,
                years,
            },
            InstrumentKind::Lumpsum => InstrumentParameters::Lumpsum {
                principal: value_of(FieldId::TotalInvestment)?,
                annual_rate_pct,
                years,
            },
            InstrumentKind::Swp => InstrumentParameters::Swp {
                principal: value_of(FieldId::TotalInvestment)?,
                monthly_withdrawal: value_of(FieldId::WithdrawalPerMonth)?,
                annual_rate_pct,
                years,
            },
        })
    }

    /// Every numeric input, labelled, for validation
    pub(crate) fn labelled_values(&self) -> Vec<(&'static str, f64)> {
        match *self {
            InstrumentParameters::Sip {
                monthly_investment,
                annual_rate_pct,
                years,
            } => vec![
                ("monthly investment", monthly_investment),
                ("annual rate", annual_rate_pct),
                ("years", years),
            ],
            InstrumentParameters::Lumpsum {
                principal,
                annual_rate_pct,
                years,
            } => vec![("principal", principal), ("annual rate", annual_rate_pct), ("years", years)],
            InstrumentParameters::Swp {
                principal,
                monthly_withdrawal,
                annual_rate_pct,
                years,
            } => vec![
                ("principal", principal),
                ("monthly withdrawal", monthly_withdrawal),
                ("annual rate", annual_rate_pct),
                ("years", years),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_requires_all_inputs() {
        let values = |id: FieldId| match id {
            FieldId::TotalInvestment => Some(50_000.0),
            FieldId::ExpectedReturn => Some(6.0),
            FieldId::TimePeriod => Some(5.0),
            _ => None,
        };

        let lumpsum = InstrumentParameters::from_fields(InstrumentKind::Lumpsum, values).unwrap();
        assert_eq!(
            lumpsum,
            InstrumentParameters::Lumpsum {
                principal: 50_000.0,
                annual_rate_pct: 6.0,
                years: 5.0
            }
        );
        assert!(InstrumentParameters::from_fields(InstrumentKind::Swp, values).is_none());
    }

    #[test]
    fn test_with_rate_keeps_other_inputs() {
        let swp = InstrumentParameters::Swp {
            principal: 50_000.0,
            monthly_withdrawal: 1_000.0,
            annual_rate_pct: 6.0,
            years: 5.0,
        };
        let bumped = swp.with_rate(9.5);
        assert_eq!(bumped.annual_rate_pct(), 9.5);
        assert_eq!(bumped.years(), 5.0);
        assert_eq!(bumped.kind(), InstrumentKind::Swp);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"instrument":"sip","monthly_investment":1000,"annual_rate_pct":5,"years":1}"#;
        let params: InstrumentParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.kind(), InstrumentKind::Sip);
    }
}
