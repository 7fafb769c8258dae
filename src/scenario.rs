//! Scenario runner for batch projections
//!
//! Loads instrument bounds once, then runs many parameter sets through the
//! same engine in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{ConfigError, ProjectionError};
use crate::instruments::InstrumentCatalog;
use crate::projection::{InstrumentParameters, ProjectionConfig, ProjectionEngine, ProjectionResult};

/// One line of a rate sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub annual_rate_pct: f64,
    pub principal: f64,
    pub gain_or_withdrawn: f64,
    pub final_value: f64,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let rows = runner.rate_sweep(&params, &[4.0, 8.0, 12.0])?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the built-in bounds
    pub fn new() -> Self {
        Self {
            engine: ProjectionEngine::default(),
        }
    }

    /// Create runner by loading bounds from the default CSV file
    pub fn from_csv() -> Result<Self, ConfigError> {
        Ok(Self::with_catalog(InstrumentCatalog::from_csv()?))
    }

    /// Create runner with pre-built bounds
    pub fn with_catalog(catalog: InstrumentCatalog) -> Self {
        Self {
            engine: ProjectionEngine::new(catalog, ProjectionConfig::default()),
        }
    }

    /// Run a single projection
    pub fn run(&self, params: &InstrumentParameters) -> Result<ProjectionResult, ProjectionError> {
        self.engine.project(params)
    }

    /// Run many parameter sets in parallel, preserving input order
    pub fn run_batch(&self, params: &[InstrumentParameters]) -> Vec<Result<ProjectionResult, ProjectionError>> {
        params.par_iter().map(|p| self.engine.project(p)).collect()
    }

    /// Project the same inputs at each annual rate
    pub fn rate_sweep(&self, base: &InstrumentParameters, rates_pct: &[f64]) -> Result<Vec<SweepRow>, ProjectionError> {
        rates_pct
            .par_iter()
            .map(|&rate| {
                let result = self.engine.project(&base.with_rate(rate))?;
                Ok(SweepRow {
                    annual_rate_pct: rate,
                    principal: result.principal_component(),
                    gain_or_withdrawn: result.gain_or_withdrawn_component(),
                    final_value: result.final_value(),
                })
            })
            .collect()
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Rates from 0 to `max_pct` inclusive in `step_pct` increments
pub fn rate_grid(max_pct: f64, step_pct: f64) -> Vec<f64> {
    if step_pct <= 0.0 || max_pct < 0.0 {
        return vec![0.0];
    }
    // 0.3 / 0.1 is 2.999..., so allow for rounding before flooring
    let count = (max_pct / step_pct + 1e-9).floor() as usize;
    (0..=count).map(|i| (i as f64 * step_pct).min(max_pct)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lumpsum() -> InstrumentParameters {
        InstrumentParameters::Lumpsum {
            principal: 50_000.0,
            annual_rate_pct: 8.0,
            years: 5.0,
        }
    }

    #[test]
    fn test_rate_sweep_is_monotonic() {
        let runner = ScenarioRunner::new();
        let rows = runner.rate_sweep(&lumpsum(), &rate_grid(40.0, 0.5)).unwrap();

        assert_eq!(rows.len(), 81);
        assert_eq!(rows[0].final_value, 50_000.0);
        // Higher rate should give a higher final value
        assert!(rows.windows(2).all(|w| w[1].final_value > w[0].final_value));
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScenarioRunner::new();
        let batch = vec![
            lumpsum(),
            InstrumentParameters::Sip {
                monthly_investment: 1_000.0,
                annual_rate_pct: 0.0,
                years: 2.0,
            },
            lumpsum().with_rate(-1.0),
        ];

        let results = runner.run_batch(&batch);
        assert_eq!(results.len(), 3);
        assert_eq!(results[1].as_ref().unwrap().final_value(), 24_000.0);
        assert!(results[2].is_err());
    }

    #[test]
    fn test_sweep_propagates_invalid_rate() {
        let runner = ScenarioRunner::new();
        assert!(runner.rate_sweep(&lumpsum(), &[5.0, -3.0]).is_err());
    }

    #[test]
    fn test_rate_grid() {
        assert_eq!(rate_grid(2.0, 0.5), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(rate_grid(1.0, 0.0), vec![0.0]);
    }

    #[test]
    fn test_rate_grid_keeps_inexact_maximum() {
        let grid = rate_grid(0.3, 0.1);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.last().copied(), Some(0.3));

        let grid = rate_grid(0.7, 0.1);
        assert_eq!(grid.len(), 8);
        assert_eq!(grid.last().copied(), Some(0.7));
        assert!(grid.iter().all(|r| *r <= 0.7));
    }
}
