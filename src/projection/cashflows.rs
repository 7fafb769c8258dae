//! Projection output structures

use serde::{Deserialize, Serialize};

use crate::format::format_rupees;
use crate::instruments::InstrumentKind;

/// One period of a projection schedule
///
/// Growth instruments emit one row per year; the withdrawal plan emits one
/// row per simulated month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Year (growth) or month (withdrawal), 1-indexed
    pub period: u32,

    pub opening_balance: f64,

    /// Money paid in during the period
    pub contribution: f64,

    pub interest: f64,

    /// Money paid out during the period
    pub withdrawal: f64,

    pub closing_balance: f64,

    pub invested_to_date: f64,

    pub withdrawn_to_date: f64,
}

/// Monetary breakdown shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Breakdown {
    /// SIP and lump-sum
    Growth {
        invested: f64,
        estimated_returns: f64,
        total_value: f64,
    },
    /// SWP
    Withdrawal {
        total_investment: f64,
        total_withdrawn: f64,
        /// Remaining balance rounded to whole rupees
        final_value: f64,
        /// Months in which a full withdrawal was paid
        withdrawals_made: u32,
        /// Month the balance first could not cover a withdrawal
        depleted_in_month: Option<u32>,
    },
}

/// A labelled amount for the pie chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub amount: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub instrument: InstrumentKind,

    /// Horizon in months (`years * 12`, rounded up)
    pub horizon_months: u32,

    pub breakdown: Breakdown,

    /// Per-period rows, empty unless detailed output was requested
    pub schedule: Vec<ScheduleRow>,
}

impl ProjectionResult {
    /// Amount the user put in
    pub fn principal_component(&self) -> f64 {
        match self.breakdown {
            Breakdown::Growth { invested, .. } => invested,
            Breakdown::Withdrawal { total_investment, .. } => total_investment,
        }
    }

    /// Estimated returns (growth) or total withdrawn (withdrawal)
    pub fn gain_or_withdrawn_component(&self) -> f64 {
        match self.breakdown {
            Breakdown::Growth { estimated_returns, .. } => estimated_returns,
            Breakdown::Withdrawal { total_withdrawn, .. } => total_withdrawn,
        }
    }

    /// Total value (growth) or remaining balance (withdrawal)
    pub fn final_value(&self) -> f64 {
        match self.breakdown {
            Breakdown::Growth { total_value, .. } => total_value,
            Breakdown::Withdrawal { final_value, .. } => final_value,
        }
    }

    /// Amounts for the pie chart
    pub fn chart_slices(&self) -> Vec<ChartSlice> {
        match self.breakdown {
            Breakdown::Growth {
                invested,
                estimated_returns,
                ..
            } => vec![
                ChartSlice {
                    label: "Invested Amount",
                    amount: invested,
                },
                ChartSlice {
                    label: "Returns",
                    amount: estimated_returns,
                },
            ],
            Breakdown::Withdrawal {
                total_investment,
                total_withdrawn,
                final_value,
                ..
            } => vec![
                ChartSlice {
                    label: "Total Investment",
                    amount: total_investment,
                },
                ChartSlice {
                    label: "Total Withdrawn",
                    amount: total_withdrawn,
                },
                ChartSlice {
                    label: "Final Value",
                    amount: final_value,
                },
            ],
        }
    }

    /// Labelled, formatted lines for the results card
    pub fn display_lines(&self) -> Vec<(&'static str, String)> {
        let labels = match self.breakdown {
            Breakdown::Growth { .. } => ["Invested Amount", "Estimated Returns", "Total Value"],
            Breakdown::Withdrawal { .. } => ["Total Investment", "Total Withdrawal", "Final Value"],
        };
        let amounts = [
            self.principal_component(),
            self.gain_or_withdrawn_component(),
            self.final_value(),
        ];
        labels
            .into_iter()
            .zip(amounts)
            .map(|(label, amount)| (label, format_rupees(amount)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn growth() -> ProjectionResult {
        ProjectionResult {
            instrument: InstrumentKind::Lumpsum,
            horizon_months: 60,
            breakdown: Breakdown::Growth {
                invested: 50_000.0,
                estimated_returns: 23_466.40,
                total_value: 73_466.40,
            },
            schedule: Vec::new(),
        }
    }

    #[test]
    fn test_components() {
        let result = growth();
        assert_eq!(result.principal_component(), 50_000.0);
        assert_eq!(result.gain_or_withdrawn_component(), 23_466.40);
        assert_eq!(result.final_value(), 73_466.40);
    }

    #[test]
    fn test_chart_slices() {
        let slices = growth().chart_slices();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Invested Amount");
        assert_eq!(slices[1].amount, 23_466.40);
    }

    #[test]
    fn test_display_lines() {
        let lines = growth().display_lines();
        assert_eq!(lines[0], ("Invested Amount", "₹ 50,000".to_string()));
        assert_eq!(lines[1], ("Estimated Returns", "₹ 23,466".to_string()));
        assert_eq!(lines[2], ("Total Value", "₹ 73,466".to_string()));
    }
}
