//! Validation of raw configuration documents
//!
//! Validation never stops at the first problem. Every rule is evaluated and
//! the findings are bucketed into global errors and per-comparison errors so
//! that an operator can fix a config in one pass. A comparison with any
//! finding is left out of the resulting [`Config`] entirely.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;

use super::{
    CompareModules, Comparison, Config, DEFAULT_DIFF_TIMEOUT, DiffConfig, RawComparison,
    RawConfig, RawDiffConfig, SOURCE_EXTENSION, SUPPORTED_VERSION, Source,
};

/// Every problem found while validating a configuration
///
/// Renders as an indented list: global errors first, then one header per
/// failing comparison followed by its own errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Problems not tied to a single comparison
    pub global: Vec<String>,
    /// Problems per comparison, keyed by zero-based position in the document
    pub comparisons: BTreeMap<usize, Vec<String>>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.comparisons.is_empty()
    }

    /// Errors recorded for the comparison at zero-based `index`
    pub fn comparison(&self, index: usize) -> &[String] {
        self.comparisons
            .get(&index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();

        for error in &self.global {
            lines.push(format!("- {error}"));
        }

        for (index, errors) in &self.comparisons {
            lines.push(format!("- comparison #{} has errors:", index + 1));
            for error in errors {
                lines.push(format!("  - {error}"));
            }
        }

        write!(f, "{}", lines.join("\n"))
    }
}

/// Validate a raw document.
///
/// Returns the configuration made of every comparison that passed, together
/// with all problems found. Callers decide whether a non-empty
/// [`ValidationErrors`] is fatal; [`Config::from_raw`] treats it as such.
pub fn validate(raw: &RawConfig) -> (Config, ValidationErrors) {
    let mut errors = ValidationErrors::default();
    let section = &raw.compare_modules;

    let version = raw.version.unwrap_or(SUPPORTED_VERSION);
    if version != SUPPORTED_VERSION {
        errors.global.push(format!(
            "unsupported config version {version}; only version {SUPPORTED_VERSION} is supported"
        ));
    }

    if section.comparisons.is_empty() {
        errors
            .global
            .push("config has no comparisons configured".to_string());
    }

    let value_regex = compile_pattern(section.value_regex.as_deref()).unwrap_or_else(|e| {
        errors.global.push(format!("invalid global valueRegex: {e}"));
        None
    });

    let mut first_use: HashMap<&str, usize> = HashMap::new();
    let mut comparisons = Vec::new();

    for (index, raw_comparison) in section.comparisons.iter().enumerate() {
        let name = raw_comparison.name.trim();
        let duplicate_of = if name.is_empty() {
            None
        } else {
            match first_use.get(name) {
                Some(first) => Some(*first),
                None => {
                    first_use.insert(name, index);
                    None
                }
            }
        };

        match validate_comparison(raw_comparison, duplicate_of) {
            Ok(comparison) => comparisons.push(comparison),
            Err(problems) => {
                errors.comparisons.insert(index, problems);
            }
        }
    }

    tracing::debug!(
        valid = comparisons.len(),
        invalid = errors.comparisons.len(),
        global_errors = errors.global.len(),
        "validated configuration"
    );

    let config = Config {
        version,
        compare_modules: CompareModules {
            comparisons,
            value_regex,
        },
    };

    (config, errors)
}

fn validate_comparison(
    raw: &RawComparison,
    duplicate_of: Option<usize>,
) -> Result<Comparison, Vec<String>> {
    let mut problems = Vec::new();

    let name = raw.name.trim();
    if name.is_empty() {
        problems.push("comparison has an empty name".to_string());
    }
    if let Some(first) = duplicate_of {
        problems.push(format!(
            "comparison name {name:?} is already used by comparison #{}",
            first + 1
        ));
    }

    let attribute_key = raw.attribute_key.trim();
    if attribute_key.is_empty() {
        problems.push("comparison has an empty attribute key".to_string());
    }

    if raw.sources.len() < 2 {
        problems.push("comparison needs at least 2 sources".to_string());
    }

    let value_regex = compile_pattern(raw.value_regex.as_deref()).unwrap_or_else(|e| {
        problems.push(format!("invalid valueRegex: {e}"));
        None
    });

    let mut labels: HashSet<&str> = HashSet::new();
    let mut sources = Vec::with_capacity(raw.sources.len());

    for (i, source) in raw.sources.iter().enumerate() {
        let position = i + 1;

        let label = source.label.trim();
        if label.is_empty() {
            problems.push(format!("source #{position} has an empty label"));
        } else if !labels.insert(label) {
            problems.push(format!("source #{position} has a duplicate label: {label}"));
        }

        let path = source.path.trim();
        if let Some(problem) = check_source_path(position, path) {
            problems.push(problem);
        }

        sources.push(Source {
            path: PathBuf::from(path),
            label: label.to_string(),
        });
    }

    let diff_config = match &raw.diff_config {
        Some(diff) => match validate_diff_config(diff, &labels) {
            Ok(config) => Some(config),
            Err(mut diff_problems) => {
                problems.append(&mut diff_problems);
                None
            }
        },
        None => None,
    };

    if !problems.is_empty() {
        return Err(problems);
    }

    Ok(Comparison {
        name: name.to_string(),
        attribute_key: attribute_key.to_string(),
        sources,
        ignore_modules: raw
            .ignore_modules
            .iter()
            .map(|m| m.trim().to_string())
            .collect(),
        value_regex,
        diff_config,
    })
}

fn check_source_path(position: usize, path: &str) -> Option<String> {
    if path.is_empty() {
        return Some(format!("source #{position} has an empty path"));
    }

    if !path.ends_with(SOURCE_EXTENSION) {
        return Some(format!(
            "source #{position} should have the extension {SOURCE_EXTENSION}"
        ));
    }

    match Path::new(path).try_exists() {
        Ok(true) => None,
        Ok(false) => Some(format!("source #{position} does not exist: {path}")),
        Err(e) => Some(format!("couldn't check if source #{position} exists: {e}")),
    }
}

/// Validate a diff configuration against the comparison's trimmed labels
pub(crate) fn validate_diff_config(
    raw: &RawDiffConfig,
    labels: &HashSet<&str>,
) -> Result<DiffConfig, Vec<String>> {
    let mut problems = Vec::new();

    let base_label = raw.base_label.trim();
    check_diff_label("base", base_label, labels, &mut problems);

    let head_label = raw.head_label.trim();
    check_diff_label("head", head_label, labels, &mut problems);

    if raw.cmd.is_empty() {
        problems.push("diff config has an empty command".to_string());
    }

    let mut command = Vec::with_capacity(raw.cmd.len());
    for (i, token) in raw.cmd.iter().enumerate() {
        let token = token.trim();
        if token.is_empty() {
            problems.push(format!("diff config command element #{} is empty", i + 1));
        }
        command.push(token.to_string());
    }

    let timeout = match raw.timeout_secs {
        Some(0) => {
            problems.push("diff config timeout must be greater than zero".to_string());
            DEFAULT_DIFF_TIMEOUT
        }
        Some(secs) => Duration::from_secs(secs),
        None => DEFAULT_DIFF_TIMEOUT,
    };

    if !problems.is_empty() {
        return Err(problems);
    }

    Ok(DiffConfig {
        base_label: base_label.to_string(),
        head_label: head_label.to_string(),
        command,
        timeout,
    })
}

fn check_diff_label(kind: &str, label: &str, labels: &HashSet<&str>, problems: &mut Vec<String>) {
    if label.is_empty() {
        problems.push(format!("diff config has an empty {kind} label"));
    } else if !labels.contains(label) {
        problems.push(format!(
            "diff config {kind} label {label:?} doesn't match any source label"
        ));
    }
}

/// Compile an optional pattern; absent and empty patterns both mean "none"
fn compile_pattern(pattern: Option<&str>) -> Result<Option<Regex>, regex::Error> {
    match pattern {
        Some(p) if !p.is_empty() => Regex::new(p).map(Some),
        _ => Ok(None),
    }
}
