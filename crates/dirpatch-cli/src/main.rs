mod commands;
mod logging;
mod progress;

use std::path::{Path, PathBuf};
use std::process;

use chrono::Local;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, DiffArgs};
use dirpatch_core::{AppConfig, DiffEngine, DiffOptions, HashAlgorithm};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{error, info};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match dirpatch_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Diff(diff_args)) => {
            if let Err(err) = run_diff(&config, diff_args) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }
}

fn run_diff(config: &AppConfig, args: DiffArgs) -> Result<(), dirpatch_core::Error> {
    let algorithm = match args.hash {
        Some(algorithm) => algorithm,
        None => HashAlgorithm::from_name(&config.default_algorithm)?,
    };
    let destination = args
        .output
        .unwrap_or_else(|| default_report_path(&config.report_dir));

    info!(
        "Starting diff of '{}' and '{}' ({})",
        args.dir_a.display(),
        args.dir_b.display(),
        algorithm,
    );

    let options = DiffOptions {
        root_a: args.dir_a,
        root_b: args.dir_b,
        algorithm,
        ignore_unchanged: args.ignore_unchanged,
        ignore_patterns: config.ignore_patterns.clone(),
        destination,
    };

    let engine = DiffEngine::new(options);
    let reporter = CliReporter::new();
    let summary = engine.run(&reporter)?;

    println!();
    info!(
        "Scan: {}, Reconcile: {}, Write: {}",
        format!("{:.2}s", summary.scan_duration.as_secs_f64()).green(),
        format!("{:.2}s", summary.reconcile_duration.as_secs_f64()).green(),
        format!("{:.2}s", summary.write_duration.as_secs_f64()).green(),
    );
    info!(
        "{} files on A, {} files on B",
        format!("{}", summary.files_a).cyan(),
        format!("{}", summary.files_b).cyan(),
    );
    info!(
        "{} to add to B, {} to add to A, {} unchanged, {} conflicting",
        format!("{}", summary.added_a).cyan(),
        format!("{}", summary.added_b).cyan(),
        format!("{}", summary.unchanged).green(),
        format!("{}", summary.conflicts).red(),
    );
    info!("Report written to {}", summary.destination.display());

    Ok(())
}

fn default_report_path(report_dir: &str) -> PathBuf {
    Path::new(report_dir).join(format!(
        "dirpatch-{}.patch",
        Local::now().format("%Y%m%d-%H%M%S")
    ))
}
