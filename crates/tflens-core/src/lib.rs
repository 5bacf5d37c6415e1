//! Core library for tflens
//!
//! Compares attributes of Terraform `module` blocks across several source
//! files and reports which modules have drifted apart.
//!
//! # Modules
//!
//! - [`config`]: `tflens.yml` parsing and validation
//! - [`extract`]: pulls attribute values out of `.tf` files
//! - [`compare`]: builds the module matrix and assigns statuses
//! - [`diff`]: runs user-supplied diff commands for drifted modules
//! - [`result`]: result types consumed by renderers
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tflens_core::{CompareOptions, Config, compare};
//!
//! let config = Config::load(Path::new("tflens.yml"))?;
//! let comparison = config.comparison("environments")?;
//! let result = compare(
//!     comparison,
//!     config.compare_modules.value_regex.as_ref(),
//!     CompareOptions::default(),
//! )?;
//! println!("drift: {}", result.has_drift());
//! # Ok::<(), tflens_core::Error>(())
//! ```

pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod extract;
pub mod result;

pub use compare::{CompareOptions, compare, compare_with, determine_status};
pub use config::{Comparison, Config, DiffConfig, Source, ValidationErrors};
pub use diff::{CommandDiffGenerator, DiffGenerator, DiffRequest};
pub use error::{DiffError, Error, ExtractError, Result, ValueError};
pub use extract::{ExtractedBlock, extract};
pub use result::{BlockResult, ComparisonResult, DiffResult, Status};
