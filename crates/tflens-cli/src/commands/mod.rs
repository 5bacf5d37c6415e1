//! Command implementations

mod compare_modules;
mod config;

pub use compare_modules::run_compare_modules;
pub use config::{run_config_sample, run_config_validate};
