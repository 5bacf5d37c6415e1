//! Raw configuration document as read from `tflens.yml`
//!
//! These types mirror the YAML layout one-to-one and carry no guarantees.
//! [`super::validate`] turns them into the typed [`super::Config`].

use serde::{Deserialize, Serialize};

/// Top-level configuration document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawConfig {
    /// Configuration schema version
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default)]
    pub compare_modules: RawCompareModules,
}

/// The `compareModules` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawCompareModules {
    #[serde(default)]
    pub comparisons: Vec<RawComparison>,

    /// Normalization regex applied to every comparison without its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_regex: Option<String>,
}

/// A single named comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawComparison {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub attribute_key: String,

    #[serde(default)]
    pub sources: Vec<RawSource>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_modules: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_regex: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_config: Option<RawDiffConfig>,
}

/// A labelled Terraform file taking part in a comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSource {
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub label: String,
}

/// Settings for generating diffs between two sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawDiffConfig {
    #[serde(default)]
    pub base_label: String,

    #[serde(default)]
    pub head_label: String,

    #[serde(default)]
    pub cmd: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl RawConfig {
    /// Parse a raw document from YAML.
    ///
    /// An empty (or whitespace-only) document yields the default, which
    /// validation later reports as having no comparisons.
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}
