//! Configuration types and loading for tflens
//!
//! A configuration is read once per invocation from `tflens.yml`, parsed into
//! [`RawConfig`], and validated into an immutable [`Config`]. Comparisons that
//! fail validation never make it into a [`Config`].

mod raw;
mod validation;

use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;

use crate::error::{Error, Result};

pub use raw::{RawCompareModules, RawComparison, RawConfig, RawDiffConfig, RawSource};
pub use validation::{ValidationErrors, validate};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "tflens.yml";

/// Only the configuration schema version currently understood
pub const SUPPORTED_VERSION: u32 = 1;

/// File extension every source must carry
pub const SOURCE_EXTENSION: &str = ".tf";

/// Upper bound for a single diff command when the config sets none
pub const DEFAULT_DIFF_TIMEOUT: Duration = Duration::from_secs(300);

/// Validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub version: u32,
    pub compare_modules: CompareModules,
}

/// Validated `compareModules` section
#[derive(Debug, Clone, Default)]
pub struct CompareModules {
    pub comparisons: Vec<Comparison>,
    /// Fallback normalization pattern for comparisons without their own
    pub value_regex: Option<Regex>,
}

/// A comparison of one attribute across two or more labelled sources
#[derive(Debug, Clone)]
pub struct Comparison {
    pub name: String,
    pub attribute_key: String,
    pub sources: Vec<Source>,
    pub ignore_modules: Vec<String>,
    pub value_regex: Option<Regex>,
    pub diff_config: Option<DiffConfig>,
}

/// A Terraform file and the label it is displayed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub label: String,
}

/// How to produce a diff between the base and head sources of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffConfig {
    pub base_label: String,
    pub head_label: String,
    pub command: Vec<String>,
    pub timeout: Duration,
}

impl Config {
    /// Read and validate the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate a YAML configuration document.
    ///
    /// Malformed YAML fails with [`Error::ConfigParse`]; a document that
    /// parses but breaks validation rules fails with [`Error::InvalidConfig`]
    /// carrying every problem found.
    pub fn parse(content: &str) -> Result<Self> {
        let raw = RawConfig::parse(content)?;
        Self::from_raw(&raw)
    }

    /// Validate an already parsed document
    pub fn from_raw(raw: &RawConfig) -> Result<Self> {
        let (config, errors) = validate(raw);
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(Error::InvalidConfig(errors))
        }
    }

    /// Look up a comparison by its name
    pub fn comparison(&self, name: &str) -> Result<&Comparison> {
        self.compare_modules
            .comparisons
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::ComparisonNotFound {
                name: name.to_string(),
            })
    }
}

impl Comparison {
    /// Source labels in configured order
    pub fn labels(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.label.clone()).collect()
    }

    /// The pattern that applies to this comparison: its own, else `global`
    pub fn effective_regex<'a>(&'a self, global: Option<&'a Regex>) -> Option<&'a Regex> {
        self.value_regex.as_ref().or(global)
    }

    /// Whether the block `name` is excluded from this comparison
    pub fn ignores(&self, name: &str) -> bool {
        self.ignore_modules.iter().any(|m| m == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(value_regex: Option<&str>) -> Comparison {
        Comparison {
            name: "apps".to_string(),
            attribute_key: "source".to_string(),
            sources: vec![
                Source {
                    path: PathBuf::from("dev/main.tf"),
                    label: "dev".to_string(),
                },
                Source {
                    path: PathBuf::from("prod/main.tf"),
                    label: "prod".to_string(),
                },
            ],
            ignore_modules: vec!["legacy".to_string()],
            value_regex: value_regex.map(|r| Regex::new(r).unwrap()),
            diff_config: None,
        }
    }

    #[test]
    fn test_effective_regex_prefers_comparison_pattern() {
        let global = Regex::new("global-(.*)").unwrap();
        let own = comparison(Some("own-(.*)"));
        assert_eq!(
            own.effective_regex(Some(&global)).unwrap().as_str(),
            "own-(.*)"
        );

        let inherited = comparison(None);
        assert_eq!(
            inherited.effective_regex(Some(&global)).unwrap().as_str(),
            "global-(.*)"
        );
        assert!(inherited.effective_regex(None).is_none());
    }

    #[test]
    fn test_labels_keep_source_order() {
        assert_eq!(comparison(None).labels(), vec!["dev", "prod"]);
    }

    #[test]
    fn test_ignores() {
        let c = comparison(None);
        assert!(c.ignores("legacy"));
        assert!(!c.ignores("vpc"));
    }

    #[test]
    fn test_parse_malformed_yaml() {
        let err = Config::parse("compareModules: [").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
        assert!(err.to_string().starts_with("couldn't parse config"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("definitely/not/here/tflens.yml")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
