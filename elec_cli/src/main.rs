//! # Loadline CLI
//!
//! Runs the range, residential and voltage drop engines from TOML or JSON
//! input files and prints a summary, the full text report, or JSON.

mod config;
mod export;

use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use elec_core::calculations::range::{self, RangeInput};
use elec_core::calculations::residential::{self, ResidentialInput};
use elec_core::calculations::voltage_drop::{self, VoltageDropInput, VoltageDropResult};
use elec_core::calculations::{CalculationOutput, DemandResult};
use elec_core::project::Project;
use elec_core::units::UnitSystem;
use elec_core::{CalcError, LoadReport};

use config::InputError;

#[derive(Parser)]
#[command(name = "loadline")]
#[command(version)]
#[command(about = "Loadline - NEC demand load and voltage drop calculations", long_about = None)]
struct Cli {
    /// Log engine decisions to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cooking appliance demand (Table 220.55)
    Range {
        /// Input file (.toml or .json)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Dwelling service demand (Article 220)
    Residential {
        /// Input file (.toml or .json)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Circuit voltage drop (Chapter 9 Table 9)
    VoltageDrop {
        /// Input file (.toml or .json)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Convert circuit lengths to this unit system before calculating
        #[arg(long, value_enum)]
        units: Option<Units>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Evaluate every item in a saved project
    Project {
        /// Project file (.json or .toml)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Print outcomes as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Print the result record as JSON
    #[arg(long)]
    json: bool,

    /// Print the full text report
    #[arg(long, conflicts_with = "json")]
    report: bool,

    /// Also write the report as CSV
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Units {
    Metric,
    Imperial,
}

impl From<Units> for UnitSystem {
    fn from(units: Units) -> Self {
        match units {
            Units::Metric => UnitSystem::Metric,
            Units::Imperial => UnitSystem::Imperial,
        }
    }
}

/// Anything that ends a command with a non-zero exit.
#[derive(Debug, Error)]
enum Failure {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error("cannot write \"{}\": {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("{failed} of {total} project items failed")]
    ProjectItems { failed: usize, total: usize },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Commands::Range { input, output } => range_command(&input, &output),
        Commands::Residential { input, output } => residential_command(&input, &output),
        Commands::VoltageDrop { input, units, output } => voltage_drop_command(&input, units, &output),
        Commands::Project { input, json } => project_command(&input, json),
    };

    if let Err(e) = outcome {
        eprintln!("error: {}", e);
        if let Failure::Calc(calc) = &e {
            if let Ok(json) = serde_json::to_string(calc) {
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}

// ============================================================================
// Commands
// ============================================================================

fn range_command(path: &Path, output: &OutputArgs) -> Result<(), Failure> {
    let input: RangeInput = config::load(path)?;
    let result = range::calculate(&input)?;
    let report = LoadReport::range(&input, &result)?;
    emit(&result, &report, output, || print_demand("COOKING APPLIANCE DEMAND", &result))
}

fn residential_command(path: &Path, output: &OutputArgs) -> Result<(), Failure> {
    let input: ResidentialInput = config::load(path)?;
    let result = residential::calculate(&input)?;
    let report = LoadReport::residential(&input, &result)?;
    emit(&result, &report, output, || print_demand("DWELLING SERVICE DEMAND", &result))
}

fn voltage_drop_command(path: &Path, units: Option<Units>, output: &OutputArgs) -> Result<(), Failure> {
    let mut input: VoltageDropInput = config::load(path)?;
    if let Some(units) = units {
        input = input.with_unit_system(units.into());
    }
    let result = voltage_drop::calculate(&input)?;
    let report = LoadReport::voltage_drop(&input, &result);
    emit(&result, &report, output, || print_voltage_drop(&result))
}

fn project_command(path: &Path, json: bool) -> Result<(), Failure> {
    let project: Project = config::load(path)?;
    let outcomes = project.calculate_all();

    if json {
        println!("{}", to_json(&outcomes)?);
    } else {
        println!("Project {} ({})", project.meta.job_id, project.meta.client);
        println!("Code: {}", project.settings.code);
        println!();
        for outcome in &outcomes {
            let line = match &outcome.result {
                Ok(CalculationOutput::Demand(d)) => {
                    format!("{:.0} VA, {:.2} A, breaker {}", d.display_demand_va(), d.display_amps(), d.breaker_label)
                }
                Ok(CalculationOutput::VoltageDrop(v)) => {
                    format!("{} circuits, max drop {:.2}%", v.circuits.len(), v.max_percent_drop)
                }
                Err(e) => format!("FAILED: {}", e),
            };
            println!("  [{}] {}: {}", outcome.calc_type, outcome.label, line);
        }
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        return Err(Failure::ProjectItems {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

fn emit<T: Serialize>(
    result: &T,
    report: &LoadReport,
    output: &OutputArgs,
    summary: impl FnOnce(),
) -> Result<(), Failure> {
    if let Some(path) = &output.csv {
        export::export_csv(report, path).map_err(|source| Failure::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "wrote CSV report");
    }

    if output.json {
        println!("{}", to_json(result)?);
    } else if output.report {
        print!("{}", report.to_text());
    } else {
        summary();
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Failure> {
    serde_json::to_string_pretty(value).map_err(|e| Failure::Calc(e.into()))
}

fn banner(title: &str) {
    println!("═══════════════════════════════════════");
    println!("  {}", title);
    println!("═══════════════════════════════════════");
}

fn print_demand(title: &str, result: &DemandResult) {
    banner(title);
    println!();
    println!("  Demand:   {:.0} VA ({:.2} kW)", result.display_demand_va(), result.demand_kw());
    println!("  Current:  {:.2} A at {} V", result.display_amps(), result.voltage);
    println!("  Breaker:  {}", result.breaker_label);

    let rules = result.annotations();
    if !rules.is_empty() {
        println!();
        println!("Rules applied:");
        for line in rules {
            println!("  - {}", line);
        }
    }
}

fn print_voltage_drop(result: &VoltageDropResult) {
    banner("VOLTAGE DROP");
    println!();
    println!("  Units: {}", result.unit_system);
    println!();
    for c in &result.circuits {
        let flag = if c.exceeds_recommended() { "  ✗ exceeds 3%" } else { "" };
        println!(
            "  {:<20} {:>7.2} A  {:>7.2} V  {:>6.2}%{}",
            c.label,
            c.current,
            c.display_voltage_drop(),
            c.display_percent_drop(),
            flag
        );
    }
    println!();
    println!("  Maximum drop: {:.2}%", result.max_percent_drop);
}
