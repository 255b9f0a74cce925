//! Clinic Queue Simulator CLI
//!
//! Runs a single simulated clinic day or a Monte-Carlo sweep and prints the
//! report to stdout. Logs go to stderr, filtered by `RUST_LOG`.

use clap::{Parser, Subcommand};
use queuesim_simulation::simulate;
use queuesim_simulator::{to_json, SimulationTable, SimulatorConfig, Sweep, TableConfig};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "queuesim")]
#[command(about = "Single-server clinic queue simulator")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one clinic day and print the per-patient table
    Run {
        /// TOML config file (missing keys use the reference clinic)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of patients
        #[arg(short, long)]
        patients: Option<usize>,

        /// Seed of the inter-arrival stream
        #[arg(short, long)]
        seed: Option<u64>,

        /// Seed of the service stream (defaults to seed + 1)
        #[arg(long)]
        service_seed: Option<u64>,

        /// Opening time in hour.minute notation, e.g. "7.00"
        #[arg(long)]
        day_start: Option<String>,

        /// Inter-arrival table as outcome:probability pairs, e.g. "2:0.5,3:0.5"
        #[arg(long)]
        inter_arrival: Option<TableConfig>,

        /// Service table as outcome:probability pairs
        #[arg(long)]
        service: Option<TableConfig>,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Repeat the configured day over many derived seed pairs
    Sweep {
        /// TOML config file (missing keys use the reference clinic)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of runs
        #[arg(short, long)]
        runs: usize,

        /// Seed from which every run's seed pair is derived
        #[arg(long, default_value_t = Sweep::DEFAULT_MASTER_SEED)]
        master_seed: u64,

        /// Number of patients per run
        #[arg(short, long)]
        patients: Option<usize>,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Table,
    Json,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "table" | "text" => Ok(OutputFormat::Table),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Unknown output format: {}", s)),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<SimulatorConfig, Box<dyn std::error::Error>> {
    Ok(match path {
        Some(path) => SimulatorConfig::load(path)?,
        None => SimulatorConfig::default(),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("queuesim=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            patients,
            seed,
            service_seed,
            day_start,
            inter_arrival,
            service,
            format,
        } => {
            let format = parse_format(&format)?;
            let mut config = load_config(config)?;
            if let Some(patients) = patients {
                config = config.with_patients(patients);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if let Some(service_seed) = service_seed {
                config = config.with_service_seed(service_seed);
            }
            if let Some(day_start) = day_start {
                config = config.with_day_start_str(&day_start)?;
            }
            if let Some(table) = inter_arrival {
                config = config.with_inter_arrival(table);
            }
            if let Some(table) = service {
                config = config.with_service(table);
            }

            let run = simulate(config.to_queue_config()?)?;
            match format {
                OutputFormat::Table => print!("{}", SimulationTable::new(&run)),
                OutputFormat::Json => println!("{}", to_json(&run)?),
            }
        }

        Commands::Sweep {
            config,
            runs,
            master_seed,
            patients,
            format,
        } => {
            let format = parse_format(&format)?;
            let mut config = load_config(config)?;
            if let Some(patients) = patients {
                config = config.with_patients(patients);
            }

            let report = Sweep::from_config(&config, runs)?
                .with_master_seed(master_seed)
                .run()?;
            match format {
                OutputFormat::Table => print!("{}", report),
                OutputFormat::Json => println!("{}", to_json(&report)?),
            }
        }
    }

    Ok(())
}
