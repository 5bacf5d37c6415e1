//! Output renderers for comparison results

use colored::Colorize;
use serde::Serialize;
use tflens_core::{BlockResult, ComparisonResult, DiffResult, Status};

/// Shown for a label whose source lacks the module
const MISSING_VALUE: &str = "-";

/// Spaces between table columns
const COLUMN_GAP: usize = 4;

/// Render the result as an aligned table followed by any diffs.
///
/// Unless `plain`, out-of-sync rows are red, not-applicable rows are dimmed
/// and diff lines are highlighted.
pub fn render_stdout(result: &ComparisonResult, plain: bool) -> String {
    let mut headers = Vec::with_capacity(result.source_labels.len() + 2);
    headers.push("module".to_string());
    headers.extend(result.source_labels.iter().cloned());
    headers.push("in-sync".to_string());

    let rows: Vec<Vec<String>> = result
        .modules
        .iter()
        .map(|module| row(module, &result.source_labels))
        .collect();

    let widths = column_widths(&headers, &rows);

    let mut output = String::new();
    output.push_str(&format_row(&headers, &widths));
    output.push('\n');

    for (cells, module) in rows.iter().zip(&result.modules) {
        let line = format_row(cells, &widths);
        if plain {
            output.push_str(&line);
        } else {
            output.push_str(&style_row(&line, module.status));
        }
        output.push('\n');
    }

    for module in &result.modules {
        if let Some(diff) = &module.diff {
            output.push_str(&render_diff(&module.name, diff, plain));
        }
    }

    output
}

/// Render the result as pretty-printed JSON
pub fn render_json(comparison: &str, result: &ComparisonResult) -> serde_json::Result<String> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Report<'a> {
        comparison: &'a str,
        has_drift: bool,
        #[serde(flatten)]
        result: &'a ComparisonResult,
    }

    serde_json::to_string_pretty(&Report {
        comparison,
        has_drift: result.has_drift(),
        result,
    })
}

fn row(module: &BlockResult, labels: &[String]) -> Vec<String> {
    let mut cells = Vec::with_capacity(labels.len() + 2);
    cells.push(module.name.clone());
    for label in labels {
        let value = module
            .values
            .get(label)
            .map(String::as_str)
            .unwrap_or(MISSING_VALUE);
        cells.push(value.to_string());
    }
    cells.push(module.status.symbol().to_string());
    cells
}

fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for cells in rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<w$}", w = width + COLUMN_GAP))
        .collect::<String>();
    line.trim_end().to_string()
}

fn style_row(line: &str, status: Status) -> String {
    match status {
        Status::OutOfSync => line.red().to_string(),
        Status::NotApplicable => line.dimmed().to_string(),
        Status::InSync => line.to_string(),
    }
}

fn render_diff(module: &str, diff: &DiffResult, plain: bool) -> String {
    let header = format!(
        "{module} {}..{} ({}..{})",
        diff.base_label, diff.head_label, diff.base_ref, diff.head_ref
    );
    let body = String::from_utf8_lossy(&diff.output);

    if plain {
        return format!("\n{header}\n\n{body}\n");
    }

    let highlighted = body
        .lines()
        .map(highlight_diff_line)
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n{}\n\n{highlighted}\n", header.bold())
}

fn highlight_diff_line(line: &str) -> String {
    if line.starts_with("+++") || line.starts_with("---") {
        line.bold().to_string()
    } else if line.starts_with('+') {
        line.green().to_string()
    } else if line.starts_with('-') {
        line.red().to_string()
    } else if line.starts_with("@@") {
        line.cyan().to_string()
    } else {
        line.to_string()
    }
}
