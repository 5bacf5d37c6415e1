//! Shared test utilities for the tflens workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`workspace`]: [`TestWorkspace`] builder for Terraform sources and configs on disk
//! - [`fixtures`]: paths into the checked-in `test-fixtures/` tree

pub mod fixtures;
pub mod workspace;

pub use workspace::TestWorkspace;
