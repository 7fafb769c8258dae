//! Core projection engine for the three calculators

use super::cashflows::{Breakdown, ProjectionResult, ScheduleRow};
use super::parameters::InstrumentParameters;
use super::state::{MonthOutcome, WithdrawalState};
use crate::error::ProjectionError;
use crate::instruments::{InstrumentCatalog, InstrumentKind};

/// Longest horizon the engine will project
pub const MAX_HORIZON_YEARS: f64 = 100.0;

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Configuration for a projection run
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Whether to build the per-period schedule
    pub detailed_output: bool,
}

impl ProjectionConfig {
    pub fn detailed() -> Self {
        Self { detailed_output: true }
    }
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    catalog: InstrumentCatalog,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given bounds and config
    pub fn new(catalog: InstrumentCatalog, config: ProjectionConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &InstrumentCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project one parameter set
    ///
    /// Pure: identical parameters always give identical results.
    pub fn project(&self, params: &InstrumentParameters) -> Result<ProjectionResult, ProjectionError> {
        let kind = params.kind();
        if let Err(err) = validate(params) {
            log::warn!("{}", err);
            return Err(err);
        }

        let result = match *params {
            InstrumentParameters::Sip {
                monthly_investment,
                annual_rate_pct,
                years,
            } => self.project_sip(monthly_investment, annual_rate_pct, years),
            InstrumentParameters::Lumpsum {
                principal,
                annual_rate_pct,
                years,
            } => self.project_lumpsum(principal, annual_rate_pct, years),
            InstrumentParameters::Swp {
                principal,
                monthly_withdrawal,
                annual_rate_pct,
                years,
            } => self.project_swp(principal, monthly_withdrawal, annual_rate_pct, years),
        };

        let outputs = [
            result.principal_component(),
            result.gain_or_withdrawn_component(),
            result.final_value(),
        ];
        if outputs.iter().any(|v| !v.is_finite()) {
            let err = ProjectionError::invalid(kind, "projection overflowed to a non-finite value");
            log::warn!("{}", err);
            return Err(err);
        }

        log::debug!(
            "{}: principal {:.2}, gain/withdrawn {:.2}, final {:.2}",
            kind,
            result.principal_component(),
            result.gain_or_withdrawn_component(),
            result.final_value()
        );
        Ok(result)
    }

    /// Floor a contribution or principal to the instrument minimum
    fn floored(&self, kind: InstrumentKind, amount: f64) -> f64 {
        match self.catalog.get(kind).floor_minimum() {
            Some(min) => amount.max(min),
            None => amount,
        }
    }

    /// Periodic contribution, annuity-due future value
    fn project_sip(&self, contribution: f64, annual_rate_pct: f64, years: f64) -> ProjectionResult {
        let contribution = self.floored(InstrumentKind::Sip, contribution);
        let monthly_rate = annual_rate_pct / MONTHS_PER_YEAR / 100.0;
        let months = years * MONTHS_PER_YEAR;

        let invested = contribution * months;
        let total_value = sip_future_value(contribution, monthly_rate, months);

        let schedule = if self.config.detailed_output {
            growth_schedule(years, |elapsed_years| {
                let m = elapsed_years * MONTHS_PER_YEAR;
                (contribution * m, sip_future_value(contribution, monthly_rate, m))
            })
        } else {
            Vec::new()
        };

        ProjectionResult {
            instrument: InstrumentKind::Sip,
            horizon_months: horizon_months(years),
            breakdown: Breakdown::Growth {
                invested,
                estimated_returns: total_value - invested,
                total_value,
            },
            schedule,
        }
    }

    /// Single principal compounding annually
    fn project_lumpsum(&self, principal: f64, annual_rate_pct: f64, years: f64) -> ProjectionResult {
        let principal = self.floored(InstrumentKind::Lumpsum, principal);
        let annual_rate = annual_rate_pct / 100.0;
        let total_value = principal * (1.0 + annual_rate).powf(years);

        let schedule = if self.config.detailed_output {
            growth_schedule(years, |elapsed_years| {
                (principal, principal * (1.0 + annual_rate).powf(elapsed_years))
            })
        } else {
            Vec::new()
        };

        ProjectionResult {
            instrument: InstrumentKind::Lumpsum,
            horizon_months: horizon_months(years),
            breakdown: Breakdown::Growth {
                invested: principal,
                estimated_returns: total_value - principal,
                total_value,
            },
            schedule,
        }
    }

    /// Month-by-month depletion by fixed withdrawals
    ///
    /// Stops at the first month whose balance after interest cannot cover a
    /// full withdrawal; that balance is reported as-is.
    fn project_swp(&self, principal: f64, withdrawal: f64, annual_rate_pct: f64, years: f64) -> ProjectionResult {
        let monthly_rate = annual_rate_pct / MONTHS_PER_YEAR / 100.0;
        let months = horizon_months(years);

        let mut state = WithdrawalState::new(principal);
        let mut schedule = Vec::new();
        let mut depleted_in_month = None;

        for _month in 1..=months {
            let outcome = state.advance_month(monthly_rate, withdrawal);

            let (opening, interest, paid) = match outcome {
                MonthOutcome::Withdrawn { opening, interest } => (opening, interest, withdrawal),
                MonthOutcome::Insufficient { opening, interest } => (opening, interest, 0.0),
            };

            if self.config.detailed_output {
                schedule.push(ScheduleRow {
                    period: state.month,
                    opening_balance: opening,
                    contribution: 0.0,
                    interest,
                    withdrawal: paid,
                    closing_balance: state.balance,
                    invested_to_date: principal,
                    withdrawn_to_date: state.total_withdrawn,
                });
            }

            if let MonthOutcome::Insufficient { .. } = outcome {
                depleted_in_month = Some(state.month);
                break;
            }
        }

        ProjectionResult {
            instrument: InstrumentKind::Swp,
            horizon_months: months,
            breakdown: Breakdown::Withdrawal {
                total_investment: principal,
                total_withdrawn: state.total_withdrawn,
                final_value: state.balance.round(),
                withdrawals_made: state.withdrawals_made,
                depleted_in_month,
            },
            schedule,
        }
    }
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new(InstrumentCatalog::default_app(), ProjectionConfig::default())
    }
}

/// Project with the built-in bounds and no schedule
pub fn project(params: &InstrumentParameters) -> Result<ProjectionResult, ProjectionError> {
    ProjectionEngine::default().project(params)
}

/// Annuity-due future value of `months` contributions
fn sip_future_value(contribution: f64, monthly_rate: f64, months: f64) -> f64 {
    if monthly_rate == 0.0 {
        contribution * months
    } else {
        contribution * ((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate * (1.0 + monthly_rate)
    }
}

fn horizon_months(years: f64) -> u32 {
    (years * MONTHS_PER_YEAR).ceil() as u32
}

/// Yearly rows for a growth instrument
///
/// `at(elapsed_years)` returns `(invested_to_date, value)`.
fn growth_schedule<F>(years: f64, at: F) -> Vec<ScheduleRow>
where
    F: Fn(f64) -> (f64, f64),
{
    let periods = years.ceil() as u32;
    let mut rows = Vec::with_capacity(periods as usize);
    let (mut prev_invested, mut prev_value) = at(0.0);

    for period in 1..=periods {
        let elapsed = (period as f64).min(years);
        let (invested, value) = at(elapsed);
        let contribution = invested - prev_invested;

        rows.push(ScheduleRow {
            period,
            opening_balance: prev_value,
            contribution,
            interest: value - prev_value - contribution,
            withdrawal: 0.0,
            closing_balance: value,
            invested_to_date: invested,
            withdrawn_to_date: 0.0,
        });

        prev_invested = invested;
        prev_value = value;
    }

    rows
}

fn validate(params: &InstrumentParameters) -> Result<(), ProjectionError> {
    let kind = params.kind();

    for (name, value) in params.labelled_values() {
        if !value.is_finite() {
            return Err(ProjectionError::invalid(kind, format!("{name} is not a finite number")));
        }
        if value < 0.0 {
            return Err(ProjectionError::invalid(kind, format!("{name} is negative ({value})")));
        }
    }

    if params.years() > MAX_HORIZON_YEARS {
        return Err(ProjectionError::invalid(
            kind,
            format!("horizon of {} years exceeds {} years", params.years(), MAX_HORIZON_YEARS),
        ));
    }

    Ok(())
}
