//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tflens_core::config::CONFIG_FILE_NAME;

/// tflens - Find drift between Terraform module blocks across environments
#[derive(Parser, Debug)]
#[command(name = "tflens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Compare modules by an attribute across multiple Terraform sources
    ///
    /// Reads module blocks from the comparison's sources and compares the
    /// configured attribute (like `source` or `version`) across them. Exits
    /// with status 1 when any module is out of sync.
    ///
    /// Examples:
    ///   tflens compare-modules apps
    ///   tflens compare-modules apps --ignore-missing-modules
    ///   tflens compare-modules apps -d -o json
    CompareModules {
        /// Name of the comparison to run
        #[arg(value_name = "COMPARISON")]
        comparison: String,

        /// Path to tflens' configuration file
        #[arg(short, long, default_value = CONFIG_FILE_NAME, env = "TFLENS_CONFIG")]
        config_path: PathBuf,

        /// Don't let the absence of a module lead to an out-of-sync status
        #[arg(short, long)]
        ignore_missing_modules: bool,

        /// Include diffs between versions (requires diffConfig in the comparison)
        #[arg(short = 'd', long)]
        include_diffs: bool,

        /// Output format for results
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Stdout)]
        output_format: OutputFormat,

        /// Do not use colors in stdout output
        #[arg(long)]
        stdout_plain: bool,
    },

    /// Manage tflens' configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print a sample configuration to stdout
    ///
    /// Use it as a starting point for your own configuration:
    ///   tflens config sample > tflens.yml
    Sample,

    /// Validate tflens' configuration file
    Validate {
        /// Path to tflens' configuration file
        #[arg(short, long, default_value = CONFIG_FILE_NAME, env = "TFLENS_CONFIG")]
        config_path: PathBuf,
    },
}

/// How comparison results are written
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table, with diffs below it
    #[default]
    Stdout,
    /// The full comparison result as JSON
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_compare_modules_defaults() {
        let cli = Cli::try_parse_from(["tflens", "compare-modules", "apps"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::CompareModules {
                comparison,
                ignore_missing_modules,
                include_diffs,
                output_format,
                stdout_plain,
                ..
            } => {
                assert_eq!(comparison, "apps");
                assert!(!ignore_missing_modules);
                assert!(!include_diffs);
                assert_eq!(output_format, OutputFormat::Stdout);
                assert!(!stdout_plain);
            }
            other => panic!("expected CompareModules, got {other:?}"),
        }
    }

    #[test]
    fn parse_compare_modules_short_flags() {
        let cli = Cli::try_parse_from([
            "tflens",
            "-v",
            "compare-modules",
            "-c",
            "ci/tflens.yml",
            "-i",
            "-d",
            "-o",
            "json",
            "apps",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Commands::CompareModules {
                comparison: "apps".to_string(),
                config_path: PathBuf::from("ci/tflens.yml"),
                ignore_missing_modules: true,
                include_diffs: true,
                output_format: OutputFormat::Json,
                stdout_plain: false,
            }
        );
    }

    #[test]
    fn parse_config_validate() {
        let cli =
            Cli::try_parse_from(["tflens", "config", "validate", "--config-path", "x.yml"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Validate {
                    config_path: PathBuf::from("x.yml"),
                },
            }
        );
    }

    #[test]
    fn reject_unknown_output_format() {
        let result = Cli::try_parse_from(["tflens", "compare-modules", "-o", "html", "apps"]);
        assert!(result.is_err());
    }

    #[test]
    fn comparison_name_is_required() {
        assert!(Cli::try_parse_from(["tflens", "compare-modules"]).is_err());
    }
}
