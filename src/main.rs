//! scanwave - plan and run interdependent scan scripts in parallel waves.
//!
//! Usage:
//!   scanwave run [SCRIPTS_FILE]      Plan a script set and execute it
//!   scanwave plan [SCRIPTS_FILE]     Show the wave plan without executing
//!   scanwave validate <SCRIPTS_FILE> Check a script-set file for problems

use clap::{Parser, Subcommand, ValueEnum};
use scanwave::{
    load_script_set, planner, sample_scripts, validate, ExecutionReport, Script, WaveExecutor,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// scanwave - a minimal wave-based scheduler for scan scripts
#[derive(Parser)]
#[command(name = "scanwave")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a script set and execute it wave by wave
    Run {
        /// Path to a YAML script-set file (uses the built-in sample set if omitted)
        #[arg(value_name = "SCRIPTS_FILE")]
        scripts_file: Option<PathBuf>,

        /// Output format for the final report
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Plan a script set and print the waves without executing anything
    Plan {
        /// Path to a YAML script-set file (uses the built-in sample set if omitted)
        #[arg(value_name = "SCRIPTS_FILE")]
        scripts_file: Option<PathBuf>,

        /// Output format for the plan
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check a script-set file: parse it and plan it, reporting any problems
    Validate {
        /// Path to a YAML script-set file
        #[arg(value_name = "SCRIPTS_FILE")]
        scripts_file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scripts_file,
            format,
        } => {
            run_scripts(scripts_file, format).await?;
        }
        Commands::Plan {
            scripts_file,
            format,
        } => {
            show_plan(scripts_file, format)?;
        }
        Commands::Validate { scripts_file } => {
            validate_scripts(scripts_file)?;
        }
    }

    Ok(())
}

/// Load the script set from a file, or fall back to the built-in sample.
fn load_scripts(
    scripts_file: Option<PathBuf>,
) -> Result<Vec<Script>, Box<dyn std::error::Error>> {
    match scripts_file {
        Some(path) => {
            info!("Loading script set from: {}", path.display());
            Ok(load_script_set(&path)?)
        }
        None => {
            info!("No script file given; using the built-in sample set");
            Ok(sample_scripts())
        }
    }
}

/// Plan a script set and execute it wave by wave.
async fn run_scripts(
    scripts_file: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let scripts = load_scripts(scripts_file)?;
    let plan = planner::plan(&scripts)?;

    for warning in plan.warnings() {
        warn!("{}", warning);
    }
    info!(
        "Planned {} script(s) into {} wave(s)",
        plan.total_scripts(),
        plan.wave_count()
    );

    let executor = WaveExecutor::new(&scripts);
    let started = Instant::now();
    executor.execute(&plan).await?;
    let elapsed = started.elapsed();

    let report = ExecutionReport::new(&plan, &scripts, elapsed);
    match format {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// Plan a script set and print the waves without executing anything.
fn show_plan(
    scripts_file: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let scripts = load_scripts(scripts_file)?;
    let plan = planner::plan(&scripts)?;

    for warning in plan.warnings() {
        warn!("{}", warning);
    }

    match format {
        OutputFormat::Text => {
            for (index, wave) in plan.waves().iter().enumerate() {
                let ids: Vec<String> = wave.iter().map(|id| id.to_string()).collect();
                println!("Wave {}: [{}]", index, ids.join(", "));
            }
            println!(
                "{} script(s) in {} wave(s), optimal: {}",
                plan.total_scripts(),
                plan.wave_count(),
                validate::is_optimal(&plan, &scripts)
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
    }

    Ok(())
}

/// Check a script-set file: parse it and plan it, reporting any problems.
fn validate_scripts(scripts_file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    info!("Validating script set: {}", scripts_file.display());

    let scripts = load_script_set(&scripts_file)?;
    let plan = planner::plan(&scripts)?;

    for warning in plan.warnings() {
        warn!("{}", warning);
    }

    println!(
        "OK: {} script(s) schedule into {} wave(s), {} warning(s)",
        plan.total_scripts(),
        plan.wave_count(),
        plan.warnings().len()
    );

    Ok(())
}
