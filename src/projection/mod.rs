//! Projection engine for SIP, lump-sum and SWP calculators

mod cashflows;
mod engine;
mod parameters;
mod state;

pub use cashflows::{Breakdown, ChartSlice, ProjectionResult, ScheduleRow};
pub use engine::{project, ProjectionConfig, ProjectionEngine, MAX_HORIZON_YEARS, MONTHS_PER_YEAR};
pub use parameters::InstrumentParameters;
pub use state::{MonthOutcome, WithdrawalState};
