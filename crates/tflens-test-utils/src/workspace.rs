//! [`TestWorkspace`] builder for tflens test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding Terraform sources and a `tflens.yml`.
///
/// # Example
///
/// ```rust,no_run
/// use tflens_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_module_versions("dev/main.tf", &[("vpc", "1.0.0")]);
/// ws.write_config("version: 1\ncompareModules:\n  comparisons: []\n");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the workspace.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a `.tf` file with one `module` block per `(name, version)` pair.
    pub fn write_module_versions(&self, relative: &str, modules: &[(&str, &str)]) -> PathBuf {
        let content = modules
            .iter()
            .map(|(name, version)| {
                format!(
                    "module \"{name}\" {{\n  source  = \"registry.example.com/{name}\"\n  version = \"{version}\"\n}}\n"
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        self.write(relative, &content)
    }

    /// Write `tflens.yml` at the workspace root.
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write("tflens.yml", content)
    }
}
