//! CLI smoke entry point.
//!
//! # Responsibility
//! - Load a JSON section store and bind it onto a demo extension.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `bootstrapper_cli [--log-level <LEVEL>] [--log-dir <DIR>] [CONFIG]`

mod health_check;

use bootstrapper_core::logging::{default_log_level, init_logging_with, LoggingConfig};
use bootstrapper_core::{ConfigurationBindingBehavior, Extension, SectionStore};
use clap::Parser;
use health_check::HealthCheck;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "bootstrapper_cli")]
#[command(about = "Bind a JSON configuration section onto the demo extension", long_about = None)]
#[command(version)]
struct Args {
    /// JSON file with a top-level `sections` object; omitted means no sections
    config: Option<PathBuf>,

    /// Log level used when `--log-dir` is set (trace, debug, info, warn, error)
    #[arg(long, default_value = default_log_level())]
    log_level: String,

    /// Directory for rolling log files; logging stays off without it
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    println!(
        "bootstrapper_core version={}",
        bootstrapper_core::core_version()
    );

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), String> {
    if let Some(log_dir) = &args.log_dir {
        init_logging_with(&LoggingConfig::new(args.log_level.as_str(), log_dir.clone()))?;
    }

    let store = match &args.config {
        Some(path) => SectionStore::from_json_file(path).map_err(|err| err.to_string())?,
        None => SectionStore::new(),
    };

    let binding = ConfigurationBindingBehavior::new(store);
    let mut check = HealthCheck::default();
    let bound = binding.bind(&mut check).map_err(|err| err.to_string())?;

    println!("extension={} bound={bound}", check.name());
    for line in check.describe() {
        println!("  {line}");
    }
    Ok(())
}
