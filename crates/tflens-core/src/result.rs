//! Comparison result types handed to renderers

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Synchronization status of a single module across sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Every compared value is identical
    InSync,
    /// Values differ, or a module is missing from a source
    OutOfSync,
    /// Fewer than two non-empty values, so there is nothing to compare
    NotApplicable,
}

impl Status {
    /// Single-character indicator used in tables
    pub fn symbol(&self) -> &'static str {
        match self {
            Status::InSync => "✓",
            Status::OutOfSync => "✗",
            Status::NotApplicable => "-",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::InSync => write!(f, "in_sync"),
            Status::OutOfSync => write!(f, "out_of_sync"),
            Status::NotApplicable => write!(f, "not_applicable"),
        }
    }
}

/// Output of a diff command run for one out-of-sync module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    /// Raw stdout of the diff command
    #[serde(serialize_with = "serialize_lossy")]
    pub output: Vec<u8>,
    pub base_label: String,
    pub head_label: String,
    pub base_ref: String,
    pub head_ref: String,
}

/// Values and status of one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockResult {
    pub name: String,
    /// Extracted value per source label; labels without the module are absent
    pub values: BTreeMap<String, String>,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<DiffResult>,
}

/// Outcome of running one comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Source labels in configured order; one column each
    pub source_labels: Vec<String>,
    /// Modules sorted by name
    pub modules: Vec<BlockResult>,
}

impl ComparisonResult {
    /// Whether any module is out of sync
    pub fn has_drift(&self) -> bool {
        self.modules.iter().any(|m| m.status == Status::OutOfSync)
    }

    /// Number of modules with the given status
    pub fn count(&self, status: Status) -> usize {
        self.modules.iter().filter(|m| m.status == status).count()
    }
}

fn serialize_lossy<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}
