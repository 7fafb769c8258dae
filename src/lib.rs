//! Investment calculators - input normalization and return projections
//!
//! This library provides:
//! - Per-field keystroke normalization with soft floors and hard ceilings
//! - Projections for SIP (monthly contribution), lump-sum and SWP (monthly withdrawal)
//! - A calculator state machine tying fields, timed messages and projections together
//! - Batch projections for rate sweeps

pub mod error;
pub mod format;
pub mod instruments;
pub mod input;
pub mod projection;
pub mod calculator;
pub mod scenario;

// Re-export commonly used types
pub use calculator::{Calculator, CalculatorEvent};
pub use error::{CalculatorError, ConfigError, FieldError, ProjectionError};
pub use input::{normalize, NumericField};
pub use instruments::{FieldConfig, FieldId, InstrumentCatalog, InstrumentKind};
pub use projection::{project, InstrumentParameters, ProjectionEngine, ProjectionResult};
pub use scenario::ScenarioRunner;
