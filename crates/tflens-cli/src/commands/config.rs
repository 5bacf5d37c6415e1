//! The `config` subcommands

use std::path::Path;

use colored::Colorize;
use tflens_core::Config;

use crate::error::{CliError, Result};

const SAMPLE_CONFIG: &str = include_str!("../../assets/sample-config.yml");

/// Print the bundled sample configuration
pub fn run_config_sample() -> Result<()> {
    print!("{SAMPLE_CONFIG}");
    Ok(())
}

/// Validate the configuration at `config_path`.
///
/// Read and parse failures are returned as errors. Validation findings are
/// printed as a report, followed by [`CliError::ConfigValidationFoundErrors`].
pub fn run_config_validate(config_path: &Path) -> Result<()> {
    match Config::load(config_path) {
        Ok(config) => {
            tracing::debug!(
                comparisons = config.compare_modules.comparisons.len(),
                "configuration loaded"
            );
            println!("{}", "Configuration is valid".green());
            Ok(())
        }
        Err(tflens_core::Error::InvalidConfig(errors)) => {
            println!("config has errors:\n{errors}");
            Err(CliError::ConfigValidationFoundErrors)
        }
        Err(e) => Err(e.into()),
    }
}
