//! Sweep the annual return rate for one calculator
//!
//! Projects the calculator's default inputs at every rate on a grid and
//! writes one CSV row per rate.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use invest_calc::scenario::rate_grid;
use invest_calc::{Calculator, InstrumentCatalog, InstrumentKind, ProjectionEngine, ScenarioRunner};

#[derive(Debug, Parser)]
#[command(name = "rate-sweep", about = "Project a calculator across a grid of return rates")]
struct Args {
    /// sip, lumpsum or swp
    #[arg(long)]
    instrument: InstrumentKind,

    /// Highest rate in percent (defaults to the field maximum)
    #[arg(long)]
    max_rate: Option<f64>,

    /// Rate increment in percent (defaults to the field step)
    #[arg(long)]
    step: Option<f64>,

    /// CSV file overriding the built-in field bounds
    #[arg(long)]
    bounds: Option<PathBuf>,

    #[arg(long, default_value = "rate_sweep_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let catalog = match &args.bounds {
        Some(path) => InstrumentCatalog::from_csv_path(path)?,
        None => InstrumentCatalog::default_app(),
    };
    let rate_field = catalog
        .get(args.instrument)
        .field(invest_calc::FieldId::ExpectedReturn)
        .cloned()
        .ok_or_else(|| anyhow!("{} has no expected_return field", args.instrument))?;

    // Default inputs as a freshly mounted calculator would hold them
    let calc = Calculator::new(args.instrument, ProjectionEngine::new(catalog.clone(), Default::default()))?;
    let base = calc.parameters();

    let rates = rate_grid(args.max_rate.unwrap_or(rate_field.max), args.step.unwrap_or(rate_field.step));
    println!("Sweeping {} over {} rates...", args.instrument, rates.len());

    let runner = ScenarioRunner::with_catalog(catalog);
    let rows = runner.rate_sweep(&base, &rates)?;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());
    if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
        println!("  {:>6.2}%: final {:.2}", first.annual_rate_pct, first.final_value);
        println!("  {:>6.2}%: final {:.2}", last.annual_rate_pct, last.final_value);
    }
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
