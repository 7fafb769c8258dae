//! Instrument definitions and per-field bound configuration
//!
//! Bounds, steps and defaults are data, not code: every calculator shares
//! the same normalizer and engine and differs only by its `InstrumentConfig`.

mod field;
pub mod loader;

pub use field::{FieldConfig, FieldId, FieldUnit};
pub use loader::DEFAULT_BOUNDS_PATH;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The three calculators offered by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// Systematic investment plan: fixed monthly contribution
    Sip,
    /// Single upfront principal compounding annually
    Lumpsum,
    /// Systematic withdrawal plan: principal depleted by monthly withdrawals
    Swp,
}

impl InstrumentKind {
    pub const ALL: [InstrumentKind; 3] = [InstrumentKind::Sip, InstrumentKind::Lumpsum, InstrumentKind::Swp];

    /// Fields in display order
    pub fn fields(&self) -> &'static [FieldId] {
        match self {
            InstrumentKind::Sip => &[FieldId::MonthlyInvestment, FieldId::ExpectedReturn, FieldId::TimePeriod],
            InstrumentKind::Lumpsum => &[FieldId::TotalInvestment, FieldId::ExpectedReturn, FieldId::TimePeriod],
            InstrumentKind::Swp => &[
                FieldId::TotalInvestment,
                FieldId::WithdrawalPerMonth,
                FieldId::ExpectedReturn,
                FieldId::TimePeriod,
            ],
        }
    }

    /// Field whose minimum the engine floors to before projecting, if any
    pub fn floored_field(&self) -> Option<FieldId> {
        match self {
            InstrumentKind::Sip => Some(FieldId::MonthlyInvestment),
            InstrumentKind::Lumpsum => Some(FieldId::TotalInvestment),
            InstrumentKind::Swp => None,
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstrumentKind::Sip => "SIP",
            InstrumentKind::Lumpsum => "Lumpsum",
            InstrumentKind::Swp => "SWP",
        };
        f.write_str(name)
    }
}

impl FromStr for InstrumentKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sip" => Ok(InstrumentKind::Sip),
            "lumpsum" | "lump-sum" | "lump_sum" => Ok(InstrumentKind::Lumpsum),
            "swp" => Ok(InstrumentKind::Swp),
            other => Err(ConfigError::UnknownInstrument(other.to_string())),
        }
    }
}

/// Field configuration for one calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub kind: InstrumentKind,
    fields: Vec<(FieldId, FieldConfig)>,
}

impl InstrumentConfig {
    pub fn new(kind: InstrumentKind, fields: Vec<(FieldId, FieldConfig)>) -> Self {
        Self { kind, fields }
    }

    /// Built-in SIP bounds
    pub fn default_sip() -> Self {
        Self::new(
            InstrumentKind::Sip,
            vec![
                (FieldId::MonthlyInvestment, FieldConfig::rupees(500.0, 500_000.0, 500.0, 8, 1_000.0)),
                (FieldId::ExpectedReturn, FieldConfig::percent(30.0, 5.0)),
                (FieldId::TimePeriod, FieldConfig::years(60.0, 1.0)),
            ],
        )
    }

    /// Built-in lump-sum bounds
    pub fn default_lumpsum() -> Self {
        Self::new(
            InstrumentKind::Lumpsum,
            vec![
                (FieldId::TotalInvestment, FieldConfig::rupees(10_000.0, 500_000_000.0, 10_000.0, 10, 50_000.0)),
                (FieldId::ExpectedReturn, FieldConfig::percent(40.0, 8.0)),
                (FieldId::TimePeriod, FieldConfig::years(100.0, 5.0)),
            ],
        )
    }

    /// Built-in SWP bounds
    pub fn default_swp() -> Self {
        Self::new(
            InstrumentKind::Swp,
            vec![
                (FieldId::TotalInvestment, FieldConfig::rupees(50_000.0, 500_000_000.0, 10_000.0, 10, 50_000.0)),
                (FieldId::WithdrawalPerMonth, FieldConfig::rupees(500.0, 1_000_000.0, 500.0, 10, 1_000.0)),
                (FieldId::ExpectedReturn, FieldConfig::percent(40.0, 6.0)),
                (FieldId::TimePeriod, FieldConfig::years(100.0, 5.0)),
            ],
        )
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldConfig> {
        self.fields.iter().find(|(f, _)| *f == id).map(|(_, c)| c)
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut FieldConfig> {
        self.fields.iter_mut().find(|(f, _)| *f == id).map(|(_, c)| c)
    }

    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &FieldConfig)> {
        self.fields.iter().map(|(id, c)| (*id, c))
    }

    /// Minimum the engine floors the principal/contribution to
    pub fn floor_minimum(&self) -> Option<f64> {
        self.kind
            .floored_field()
            .and_then(|id| self.field(id))
            .map(|c| c.min)
    }
}

/// Configuration for all three calculators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentCatalog {
    pub sip: InstrumentConfig,
    pub lumpsum: InstrumentConfig,
    pub swp: InstrumentConfig,
}

impl InstrumentCatalog {
    /// Bounds shipped with the app
    pub fn default_app() -> Self {
        Self {
            sip: InstrumentConfig::default_sip(),
            lumpsum: InstrumentConfig::default_lumpsum(),
            swp: InstrumentConfig::default_swp(),
        }
    }

    /// Load bound overrides from the default location (data/instruments/)
    pub fn from_csv() -> Result<Self, ConfigError> {
        Self::from_csv_path(Path::new(DEFAULT_BOUNDS_PATH))
    }

    /// Load bound overrides from a CSV file on top of the built-in defaults
    pub fn from_csv_path(path: &Path) -> Result<Self, ConfigError> {
        let mut catalog = Self::default_app();
        loader::apply_bounds_file(&mut catalog, path)?;
        log::info!("Loaded instrument bounds from {}", path.display());
        Ok(catalog)
    }

    pub fn get(&self, kind: InstrumentKind) -> &InstrumentConfig {
        match kind {
            InstrumentKind::Sip => &self.sip,
            InstrumentKind::Lumpsum => &self.lumpsum,
            InstrumentKind::Swp => &self.swp,
        }
    }

    pub fn get_mut(&mut self, kind: InstrumentKind) -> &mut InstrumentConfig {
        match kind {
            InstrumentKind::Sip => &mut self.sip,
            InstrumentKind::Lumpsum => &mut self.lumpsum,
            InstrumentKind::Swp => &mut self.swp,
        }
    }
}

impl Default for InstrumentCatalog {
    fn default() -> Self {
        Self::default_app()
    }
}
