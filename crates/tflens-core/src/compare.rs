//! Module comparison engine
//!
//! Runs the extractor over every source of a comparison, merges the results
//! into a module-by-label matrix, and assigns each module a [`Status`].
//! Any extraction or diff failure aborts the whole comparison; a partial
//! matrix is never returned.

use std::collections::BTreeMap;

use regex::Regex;

use crate::config::{Comparison, DiffConfig};
use crate::diff::{CommandDiffGenerator, DiffGenerator, DiffRequest};
use crate::error::{Error, Result};
use crate::extract;
use crate::result::{BlockResult, ComparisonResult, DiffResult, Status};

/// module name -> source label -> extracted value
type Matrix = BTreeMap<String, BTreeMap<String, String>>;

/// Switches controlling a comparison run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareOptions {
    /// Don't treat a module missing from some source as out of sync
    pub ignore_missing: bool,
    /// Run the comparison's diff command for out-of-sync modules
    pub include_diffs: bool,
}

/// Compare a module attribute across all sources of `comparison`.
///
/// `global_regex` is used when the comparison has no pattern of its own.
/// Diffs, when requested, are produced by running the configured command.
pub fn compare(
    comparison: &Comparison,
    global_regex: Option<&Regex>,
    options: CompareOptions,
) -> Result<ComparisonResult> {
    compare_with(comparison, global_regex, options, &CommandDiffGenerator)
}

/// [`compare`] with a caller-supplied diff generator
pub fn compare_with(
    comparison: &Comparison,
    global_regex: Option<&Regex>,
    options: CompareOptions,
    generator: &dyn DiffGenerator,
) -> Result<ComparisonResult> {
    let pattern = comparison.effective_regex(global_regex);
    let mut matrix = Matrix::new();

    for source in &comparison.sources {
        let blocks = extract::extract(&source.path, &comparison.attribute_key, pattern)?;

        for block in blocks {
            if comparison.ignores(&block.name) {
                continue;
            }
            matrix
                .entry(block.name)
                .or_default()
                .insert(source.label.clone(), block.value);
        }
    }

    let diff_config = if options.include_diffs {
        comparison.diff_config.as_ref()
    } else {
        None
    };

    let result = build_result(
        matrix,
        comparison.labels(),
        options.ignore_missing,
        diff_config,
        generator,
    )?;

    tracing::info!(
        comparison = %comparison.name,
        modules = result.modules.len(),
        in_sync = result.count(Status::InSync),
        out_of_sync = result.count(Status::OutOfSync),
        not_applicable = result.count(Status::NotApplicable),
        "comparison finished"
    );

    Ok(result)
}

fn build_result(
    matrix: Matrix,
    labels: Vec<String>,
    ignore_missing: bool,
    diff_config: Option<&DiffConfig>,
    generator: &dyn DiffGenerator,
) -> Result<ComparisonResult> {
    let mut modules = Vec::with_capacity(matrix.len());

    // BTreeMap iteration yields module names in lexicographic order
    for (name, mut by_label) in matrix {
        let mut values = BTreeMap::new();
        let mut is_missing = false;

        for label in &labels {
            match by_label.remove(label) {
                Some(value) => {
                    values.insert(label.clone(), value);
                }
                None => is_missing = true,
            }
        }

        let status = determine_status(&values, is_missing, ignore_missing);

        let diff = match diff_config {
            Some(config) if status == Status::OutOfSync => {
                run_diff(&name, &values, config, generator)?
            }
            _ => None,
        };

        modules.push(BlockResult {
            name,
            values,
            status,
            diff,
        });
    }

    Ok(ComparisonResult {
        source_labels: labels,
        modules,
    })
}

/// Status of one module given the values found for it.
///
/// A module absent from any source is out of sync unless `ignore_missing`.
/// Otherwise empty values are disregarded; fewer than two remaining values
/// leave nothing to compare.
pub fn determine_status(
    values: &BTreeMap<String, String>,
    is_missing: bool,
    ignore_missing: bool,
) -> Status {
    if is_missing && !ignore_missing {
        return Status::OutOfSync;
    }

    let mut non_empty = values.values().filter(|v| !v.is_empty());

    let Some(first) = non_empty.next() else {
        return Status::NotApplicable;
    };

    let mut rest = non_empty.peekable();
    if rest.peek().is_none() {
        return Status::NotApplicable;
    }

    if rest.all(|v| v == first) {
        Status::InSync
    } else {
        Status::OutOfSync
    }
}

fn run_diff(
    module: &str,
    values: &BTreeMap<String, String>,
    config: &DiffConfig,
    generator: &dyn DiffGenerator,
) -> Result<Option<DiffResult>> {
    let (Some(base_ref), Some(head_ref)) = (
        values.get(&config.base_label),
        values.get(&config.head_label),
    ) else {
        return Ok(None);
    };

    if base_ref == head_ref {
        return Ok(None);
    }

    let request = DiffRequest {
        module,
        base_ref,
        head_ref,
        command: &config.command,
        timeout: config.timeout,
    };

    let output = generator.generate(&request).map_err(|source| Error::Diff {
        module: module.to_string(),
        command: config.command.clone(),
        source,
    })?;

    Ok(Some(DiffResult {
        output,
        base_label: config.base_label.clone(),
        head_label: config.head_label.clone(),
        base_ref: base_ref.clone(),
        head_ref: head_ref.clone(),
    }))
}
