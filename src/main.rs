//! Investment calculator CLI
//!
//! Runs one calculator with the given inputs, or replays a scripted sequence
//! of input events, and prints the resulting breakdown.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use invest_calc::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult, ScheduleRow};
use invest_calc::{Calculator, CalculatorEvent, FieldId, InstrumentCatalog, InstrumentKind, InstrumentParameters};

#[derive(Debug, Parser)]
#[command(name = "invest-calc", version, about = "SIP, SWP and lump-sum return calculators")]
struct Cli {
    /// CSV file overriding the built-in field bounds
    #[arg(long, global = true)]
    bounds: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write the per-period schedule to this CSV file
    #[arg(long, global = true)]
    schedule: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Monthly contribution growth
    Sip {
        /// Monthly investment, as typed
        #[arg(long)]
        monthly: Option<String>,
        /// Expected annual return in percent
        #[arg(long)]
        rate: Option<String>,
        /// Time period in years
        #[arg(long)]
        years: Option<String>,
    },
    /// Single principal compounding annually
    Lumpsum {
        #[arg(long)]
        principal: Option<String>,
        #[arg(long)]
        rate: Option<String>,
        #[arg(long)]
        years: Option<String>,
    },
    /// Monthly withdrawals from a principal
    Swp {
        #[arg(long)]
        principal: Option<String>,
        #[arg(long)]
        withdrawal: Option<String>,
        #[arg(long)]
        rate: Option<String>,
        #[arg(long)]
        years: Option<String>,
    },
    /// Replay a JSON script of input events
    Replay {
        file: PathBuf,
    },
}

/// Script consumed by `replay`
#[derive(Debug, Deserialize)]
struct ReplayScript {
    instrument: InstrumentKind,
    events: Vec<CalculatorEvent>,
}

#[derive(Debug, Serialize)]
struct FieldReport {
    field: FieldId,
    text: String,
    value: f64,
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    parameters: InstrumentParameters,
    fields: Vec<FieldReport>,
    result: Option<&'a ProjectionResult>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let catalog = match &cli.bounds {
        Some(path) => InstrumentCatalog::from_csv_path(path)
            .with_context(|| format!("loading bounds from {}", path.display()))?,
        None => InstrumentCatalog::default_app(),
    };
    let engine = ProjectionEngine::new(
        catalog,
        ProjectionConfig {
            detailed_output: cli.schedule.is_some(),
        },
    );

    let calc = match &cli.command {
        Command::Sip { monthly, rate, years } => run_inputs(
            engine,
            InstrumentKind::Sip,
            &[
                (FieldId::MonthlyInvestment, monthly),
                (FieldId::ExpectedReturn, rate),
                (FieldId::TimePeriod, years),
            ],
        )?,
        Command::Lumpsum { principal, rate, years } => run_inputs(
            engine,
            InstrumentKind::Lumpsum,
            &[
                (FieldId::TotalInvestment, principal),
                (FieldId::ExpectedReturn, rate),
                (FieldId::TimePeriod, years),
            ],
        )?,
        Command::Swp {
            principal,
            withdrawal,
            rate,
            years,
        } => run_inputs(
            engine,
            InstrumentKind::Swp,
            &[
                (FieldId::TotalInvestment, principal),
                (FieldId::WithdrawalPerMonth, withdrawal),
                (FieldId::ExpectedReturn, rate),
                (FieldId::TimePeriod, years),
            ],
        )?,
        Command::Replay { file } => replay(engine, file, cli.json)?,
    };

    print_report(&calc, cli.json)?;

    if let Some(path) = &cli.schedule {
        let result = calc.result().map_err(|e| anyhow!("{e}"))?;
        write_schedule(path, &result.schedule)?;
        println!("\nSchedule written to: {}", path.display());
    }

    Ok(())
}

/// Mount a calculator and type each provided input into its field
fn run_inputs(engine: ProjectionEngine, kind: InstrumentKind, inputs: &[(FieldId, &Option<String>)]) -> Result<Calculator> {
    let mut calc = Calculator::new(kind, engine)?;
    for (field, text) in inputs {
        if let Some(text) = text {
            if !calc.edit_text(*field, text)? {
                log::warn!("{}: ignored input {:?}", field, text);
            }
        }
    }
    Ok(calc)
}

fn replay(engine: ProjectionEngine, path: &Path, json: bool) -> Result<Calculator> {
    let file = File::open(path).with_context(|| format!("opening replay script {}", path.display()))?;
    let script: ReplayScript =
        serde_json::from_reader(file).with_context(|| format!("parsing replay script {}", path.display()))?;

    let mut calc = Calculator::new(script.instrument, engine)?;
    for (step, event) in script.events.iter().enumerate() {
        calc.handle(event)?;
        if !json {
            println!("[{:>3}] t={:>6}ms {:?}", step + 1, calc.now().as_millis(), event);
            for field in calc.fields() {
                if let Some(message) = field.error_message() {
                    println!("        {} = {} ({})", field.id(), field.raw_text(), message);
                }
            }
        }
    }
    if !json {
        println!();
    }
    Ok(calc)
}

fn print_report(calc: &Calculator, json: bool) -> Result<()> {
    if json {
        let report = Report {
            parameters: calc.parameters(),
            fields: calc
                .fields()
                .iter()
                .map(|f| FieldReport {
                    field: f.id(),
                    text: f.raw_text().to_string(),
                    value: f.value(),
                    message: f.error_message(),
                })
                .collect(),
            result: calc.result().ok(),
            error: calc.result().err().map(ToString::to_string),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} Calculator", calc.kind());
    println!("{}", "-".repeat(40));
    for field in calc.fields() {
        let message = field.error_message().map(|m| format!("  <- {m}")).unwrap_or_default();
        println!("  {:<22} {:>14}{}", field.id(), field.raw_text(), message);
    }
    println!();

    match calc.result() {
        Ok(result) => {
            for (label, amount) in result.display_lines() {
                println!("  {:<22} {:>14}", label, amount);
            }
        }
        Err(err) => println!("  {err}"),
    }
    Ok(())
}

fn write_schedule(path: &Path, rows: &[ScheduleRow]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating schedule file {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
