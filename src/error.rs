//! Error types shared across the calculators

use std::path::PathBuf;

use thiserror::Error;

use crate::instruments::{FieldId, InstrumentKind};

/// Validation feedback attached to a single numeric field.
///
/// The `Display` output is the exact message shown under the input box.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// Typed value is below the field minimum; the value is kept as typed
    #[error("Min. value allowed is {label}")]
    BelowMinimum { bound: f64, label: String },

    /// Typed value exceeded the field maximum and was clamped
    #[error("Max. value allowed is {label}")]
    AboveMaximum { bound: f64, label: String },
}

impl FieldError {
    /// Whether this error should clear itself after the auto-clear delay
    pub fn is_self_clearing(&self) -> bool {
        matches!(self, FieldError::AboveMaximum { .. })
    }
}

/// Raised by the projection engine instead of returning a nonsensical number
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("invalid {instrument} parameters: {reason}")]
    InvalidParameters {
        instrument: InstrumentKind,
        reason: String,
    },
}

impl ProjectionError {
    pub(crate) fn invalid(instrument: InstrumentKind, reason: impl Into<String>) -> Self {
        ProjectionError::InvalidParameters {
            instrument,
            reason: reason.into(),
        }
    }
}

/// Misrouted events sent to a calculator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculatorError {
    #[error("{instrument} calculator has no field '{field}'")]
    UnknownField { instrument: InstrumentKind, field: FieldId },

    #[error("{instrument} configuration is missing field '{field}'")]
    MissingFieldConfig { instrument: InstrumentKind, field: FieldId },
}

/// Failures while loading instrument configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read bounds file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed bounds file")]
    Csv(#[from] csv::Error),

    #[error("unknown instrument '{0}'")]
    UnknownInstrument(String),

    #[error("instrument {instrument} has no field '{field}'")]
    UnknownField {
        instrument: InstrumentKind,
        field: String,
    },

    #[error("invalid bounds for {instrument}/{field}: {reason}")]
    InvalidBounds {
        instrument: InstrumentKind,
        field: String,
        reason: String,
    },
}
