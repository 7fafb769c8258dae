//! CSV-based bound loader
//!
//! Loads per-field bounds from data/instruments/field_bounds.csv. Rows
//! override the built-in defaults; fields missing from the file keep them.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::{FieldId, InstrumentCatalog, InstrumentKind};
use crate::error::ConfigError;
use crate::projection::MAX_HORIZON_YEARS;

/// Default path to the bounds file
pub const DEFAULT_BOUNDS_PATH: &str = "data/instruments/field_bounds.csv";

/// One row of the bounds file
#[derive(Debug, Deserialize)]
struct BoundsRecord {
    instrument: String,
    field: String,
    min: f64,
    max: f64,
    step: f64,
    allow_decimal: bool,
    max_text_length: usize,
    default: f64,
}

/// Apply every row of a bounds file to the catalog
pub fn apply_bounds_file(catalog: &mut InstrumentCatalog, path: &Path) -> Result<(), ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    apply_bounds_from_reader(catalog, file)
}

/// Apply bounds rows from any reader (CSV with header)
pub fn apply_bounds_from_reader<R: Read>(catalog: &mut InstrumentCatalog, reader: R) -> Result<(), ConfigError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    for result in reader.deserialize() {
        let record: BoundsRecord = result?;
        let kind: InstrumentKind = record.instrument.parse()?;
        let field_id = record.field.parse::<FieldId>().map_err(|field| ConfigError::UnknownField {
            instrument: kind,
            field,
        })?;

        let config = catalog
            .get_mut(kind)
            .field_mut(field_id)
            .ok_or_else(|| ConfigError::UnknownField {
                instrument: kind,
                field: record.field.clone(),
            })?;

        let mut updated = config.clone();
        updated.min = record.min;
        updated.max = record.max;
        updated.step = record.step;
        updated.allow_decimal = record.allow_decimal;
        updated.max_text_length = record.max_text_length;
        updated.default = record.default;

        updated.validate().map_err(|reason| ConfigError::InvalidBounds {
            instrument: kind,
            field: record.field.clone(),
            reason,
        })?;

        if field_id == FieldId::TimePeriod && updated.max > MAX_HORIZON_YEARS {
            return Err(ConfigError::InvalidBounds {
                instrument: kind,
                field: record.field.clone(),
                reason: format!("max {} exceeds the {} year projection horizon", updated.max, MAX_HORIZON_YEARS),
            });
        }

        log::debug!("{}/{}: [{}, {}] step {}", kind, field_id, updated.min, updated.max, updated.step);
        *config = updated;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "instrument,field,min,max,step,allow_decimal,max_text_length,default\n";

    #[test]
    fn test_override_single_field() {
        let mut catalog = InstrumentCatalog::default_app();
        let data = format!("{HEADER}sip,monthly_investment,1000,100000,1000,false,6,2000\n");

        apply_bounds_from_reader(&mut catalog, data.as_bytes()).unwrap();

        let field = catalog.sip.field(FieldId::MonthlyInvestment).unwrap();
        assert_eq!(field.min, 1000.0);
        assert_eq!(field.max, 100_000.0);
        assert_eq!(field.max_text_length, 6);
        assert_eq!(field.default, 2000.0);
        // Untouched instruments keep their defaults
        assert_eq!(catalog.swp, InstrumentCatalog::default_app().swp);
    }

    #[test]
    fn test_unknown_field_for_instrument() {
        let mut catalog = InstrumentCatalog::default_app();
        let data = format!("{HEADER}sip,withdrawal_per_month,500,1000,500,false,6,500\n");

        let err = apply_bounds_from_reader(&mut catalog, data.as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownField { instrument: InstrumentKind::Sip, .. }));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut catalog = InstrumentCatalog::default_app();
        let data = format!("{HEADER}swp,time_period,10,5,1,false,3,5\n");

        let err = apply_bounds_from_reader(&mut catalog, data.as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { .. }));
    }

    #[test]
    fn test_horizon_beyond_projection_limit_rejected() {
        let mut catalog = InstrumentCatalog::default_app();
        let data = format!("{HEADER}lumpsum,time_period,1,150,1,false,3,5\n");

        let err = apply_bounds_from_reader(&mut catalog, data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidBounds {
                instrument: InstrumentKind::Lumpsum,
                ..
            }
        ));
        // Failed row leaves the field untouched
        assert_eq!(catalog.lumpsum.field(FieldId::TimePeriod).unwrap().max, 100.0);
    }

    #[test]
    fn test_unknown_instrument() {
        let mut catalog = InstrumentCatalog::default_app();
        let data = format!("{HEADER}annuity,time_period,1,5,1,false,3,1\n");

        let err = apply_bounds_from_reader(&mut catalog, data.as_bytes()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownInstrument(_)));
    }

    #[test]
    fn test_shipped_bounds_file_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_BOUNDS_PATH);
        let catalog = InstrumentCatalog::from_csv_path(&path).unwrap();
        assert_eq!(catalog, InstrumentCatalog::default_app());
    }
}
