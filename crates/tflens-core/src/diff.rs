//! Diff generation through user-supplied commands
//!
//! For a module whose base and head values differ, the configured command is
//! run with the two values and the module name exported as environment
//! variables. Whatever the command prints on stdout becomes the diff.

use std::process::Stdio;
use std::time::Duration;

use crate::error::DiffError;

/// Environment variable carrying the base source's value
pub const ENV_BASE_REF: &str = "TFLENS_DIFF_BASE_REF";
/// Environment variable carrying the head source's value
pub const ENV_HEAD_REF: &str = "TFLENS_DIFF_HEAD_REF";
/// Environment variable carrying the module name
pub const ENV_MODULE_NAME: &str = "TFLENS_DIFF_MODULE_NAME";

/// Everything needed to run one diff command
#[derive(Debug, Clone, Copy)]
pub struct DiffRequest<'a> {
    pub module: &'a str,
    pub base_ref: &'a str,
    pub head_ref: &'a str,
    /// Program followed by its arguments
    pub command: &'a [String],
    pub timeout: Duration,
}

/// Produces diff output for a module
///
/// [`CommandDiffGenerator`] is the real implementation; the comparison engine
/// accepts any generator so callers can substitute their own.
pub trait DiffGenerator {
    fn generate(&self, request: &DiffRequest<'_>) -> Result<Vec<u8>, DiffError>;
}

/// Runs the configured command as a child process
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandDiffGenerator;

impl DiffGenerator for CommandDiffGenerator {
    fn generate(&self, request: &DiffRequest<'_>) -> Result<Vec<u8>, DiffError> {
        generate_diff(request)
    }
}

/// Run the diff command and return its stdout.
///
/// The child inherits the current environment plus [`ENV_BASE_REF`],
/// [`ENV_HEAD_REF`] and [`ENV_MODULE_NAME`]. It gets no stdin. If it has not
/// finished within `request.timeout` it is killed.
pub fn generate_diff(request: &DiffRequest<'_>) -> Result<Vec<u8>, DiffError> {
    let (program, args) = request
        .command
        .split_first()
        .ok_or(DiffError::EmptyCommand)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(DiffError::Runtime)?;

    let mut cmd = tokio::process::Command::new(program);
    cmd.args(args)
        .env(ENV_BASE_REF, request.base_ref)
        .env(ENV_HEAD_REF, request.head_ref)
        .env(ENV_MODULE_NAME, request.module)
        .stdin(Stdio::null())
        .kill_on_drop(true);

    tracing::debug!(
        module = request.module,
        base_ref = request.base_ref,
        head_ref = request.head_ref,
        command = ?request.command,
        "running diff command"
    );

    let outcome =
        runtime.block_on(async { tokio::time::timeout(request.timeout, cmd.output()).await });

    let output = match outcome {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(DiffError::Spawn(e)),
        Err(_) => {
            tracing::warn!(
                module = request.module,
                timeout_secs = request.timeout.as_secs(),
                "diff command timed out"
            );
            return Err(DiffError::TimedOut {
                timeout: request.timeout,
            });
        }
    };

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(DiffError::NonZeroExit {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
