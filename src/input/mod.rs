//! Input normalization for calculator fields

mod field;
mod normalizer;

pub use field::NumericField;
pub use normalizer::{normalize, Normalized};

use std::time::Duration;

/// How long an over-maximum message stays up without further edits
pub const AUTO_CLEAR_DELAY: Duration = Duration::from_secs(2);
