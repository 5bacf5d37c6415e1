//! tflens CLI
//!
//! Compares attributes of Terraform module blocks across environments.

mod cli;
mod commands;
mod error;
mod logging;
mod render;

use clap::Parser;
use colored::Colorize;
use tflens_core::CompareOptions;

use cli::{Cli, Commands, ConfigAction};
use error::Result;

fn main() {
    if let Err(e) = run() {
        if !e.is_silent() {
            eprintln!("{}: {}", "error".red().bold(), e);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Commands::CompareModules {
            comparison,
            config_path,
            ignore_missing_modules,
            include_diffs,
            output_format,
            stdout_plain,
        } => {
            let options = CompareOptions {
                ignore_missing: ignore_missing_modules,
                include_diffs,
            };
            commands::run_compare_modules(
                &config_path,
                &comparison,
                options,
                output_format,
                stdout_plain,
            )
        }
        Commands::Config { action } => match action {
            ConfigAction::Sample => commands::run_config_sample(),
            ConfigAction::Validate { config_path } => commands::run_config_validate(&config_path),
        },
    }
}
