//! Error types for tflens-core

use std::path::PathBuf;
use std::time::Duration;

use crate::config::ValidationErrors;

/// Result type for tflens-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a configuration or running a comparison
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration file could not be read
    #[error("couldn't read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration document is not valid YAML of the expected shape
    #[error("couldn't parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// The configuration parsed but failed validation
    #[error("config has errors:\n{0}")]
    InvalidConfig(ValidationErrors),

    /// No comparison with the requested name exists
    #[error("comparison not found: {name:?}")]
    ComparisonNotFound { name: String },

    /// An attribute could not be extracted from a source
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The diff command for an out-of-sync module failed
    #[error("couldn't compute diff for module {module:?} (command: {command:?}): {source}")]
    Diff {
        module: String,
        command: Vec<String>,
        #[source]
        source: DiffError,
    },
}

/// Errors raised while extracting attribute values from a Terraform file
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("couldn't read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't parse file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    /// A `module` block has no name label
    #[error("module block missing label in {path}")]
    MissingLabel { path: PathBuf },

    #[error("couldn't extract {attribute} from module {module:?} in {path}: {source}")]
    Value {
        path: PathBuf,
        module: String,
        attribute: String,
        #[source]
        source: ValueError,
    },
}

/// Reasons an attribute expression cannot be turned into a comparable string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("template expressions with interpolation are not supported")]
    TemplateWithInterpolation,

    #[error("invalid template expression: {message}")]
    InvalidTemplate { message: String },

    #[error("unsupported expression type: {0}")]
    UnsupportedExpression(&'static str),

    #[error("null values cannot be converted to string")]
    Null,
}

/// Failures of an external diff command
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("empty command")]
    EmptyCommand,

    /// The process could not be started at all
    #[error("couldn't run command: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("couldn't set up process runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The process ran but exited unsuccessfully
    #[error(
        "command exited with non success exit code\n\nexit_code: {code}\n----- stdout -----\n{stdout}\n----- stderr -----\n{stderr}"
    )]
    NonZeroExit {
        code: i32,
        stdout: String,
        stderr: String,
    },

    /// The process did not finish within the configured timeout and was killed
    #[error("command timed out after {}s", .timeout.as_secs())]
    TimedOut { timeout: Duration },
}
