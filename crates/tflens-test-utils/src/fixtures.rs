//! Locations of the checked-in fixtures under `test-fixtures/`.

use std::path::PathBuf;

/// Root of the `test-fixtures/` directory at the workspace root.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join("test-fixtures")
}

/// `test-fixtures/environments/<name>/main.tf`
pub fn environment_source(name: &str) -> PathBuf {
    fixtures_dir().join("environments").join(name).join("main.tf")
}

/// `test-fixtures/config/<name>`
pub fn config_file(name: &str) -> PathBuf {
    fixtures_dir().join("config").join(name)
}
