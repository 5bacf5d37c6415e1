//! The `compare-modules` command

use std::path::Path;

use tflens_core::{CompareOptions, Config, compare};

use crate::cli::OutputFormat;
use crate::error::{CliError, Result};
use crate::render;

/// Run the named comparison and print its result.
///
/// Drift is reported through [`CliError::ModulesNotInSync`] once the result
/// has been printed, whatever the output format.
pub fn run_compare_modules(
    config_path: &Path,
    name: &str,
    options: CompareOptions,
    format: OutputFormat,
    plain: bool,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let comparison = config.comparison(name)?;

    if options.include_diffs && comparison.diff_config.is_none() {
        tracing::warn!(
            comparison = name,
            "diffs requested but the comparison has no diffConfig"
        );
    }

    let result = compare(
        comparison,
        config.compare_modules.value_regex.as_ref(),
        options,
    )?;

    match format {
        OutputFormat::Stdout => print!("{}", render::render_stdout(&result, plain)),
        OutputFormat::Json => println!("{}", render::render_json(name, &result)?),
    }

    if result.has_drift() {
        return Err(CliError::ModulesNotInSync);
    }

    Ok(())
}
