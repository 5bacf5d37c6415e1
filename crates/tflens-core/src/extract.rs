//! Attribute extraction from Terraform sources
//!
//! Parses a `.tf` file and, for every `module` block, pulls out the value of
//! one attribute as a plain string. Only literal values (or templates that
//! amount to a single literal) can be compared; anything that would need
//! evaluation is rejected.

use std::path::Path;

use hcl::expr::{Expression, TemplateExpr};
use hcl::template::{Element, Template};
use regex::Regex;

use crate::error::{ExtractError, ValueError};

/// Block type whose instances are compared
pub const MODULE_BLOCK: &str = "module";

/// The value of the configured attribute for one named block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock {
    pub name: String,
    pub value: String,
}

/// A literal attribute value
#[derive(Debug, Clone, PartialEq)]
enum Literal {
    String(String),
    Bool(bool),
    Number(hcl::Number),
    Null,
}

impl Literal {
    fn from_expression(expr: &Expression) -> Result<Self, ValueError> {
        match expr {
            Expression::String(s) => Ok(Literal::String(s.clone())),
            Expression::Bool(b) => Ok(Literal::Bool(*b)),
            Expression::Number(n) => Ok(Literal::Number(n.clone())),
            Expression::Null => Ok(Literal::Null),
            Expression::TemplateExpr(template) => Self::from_template(template),
            other => Err(ValueError::UnsupportedExpression(expression_kind(other))),
        }
    }

    /// A template counts as a literal only when it is exactly one literal part
    fn from_template(expr: &TemplateExpr) -> Result<Self, ValueError> {
        let template = Template::from_expr(expr).map_err(|e| ValueError::InvalidTemplate {
            message: e.to_string(),
        })?;

        match template.elements() {
            [Element::Literal(literal)] => Ok(Literal::String(literal.clone())),
            _ => Err(ValueError::TemplateWithInterpolation),
        }
    }

    fn into_value(self) -> Result<String, ValueError> {
        match self {
            Literal::String(s) => Ok(s),
            Literal::Bool(b) => Ok(b.to_string()),
            Literal::Number(n) => Ok(format_number(&n)),
            Literal::Null => Err(ValueError::Null),
        }
    }
}

/// Extract `attribute_key` from every module block in the file at `path`.
///
/// Blocks lacking the attribute are skipped. When `pattern` matches and has
/// a first capture group, the captured text replaces the raw value.
pub fn extract(
    path: &Path,
    attribute_key: &str,
    pattern: Option<&Regex>,
) -> Result<Vec<ExtractedBlock>, ExtractError> {
    let content = std::fs::read_to_string(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let blocks = extract_from_str(&content, path, attribute_key, pattern)?;
    tracing::debug!(
        path = %path.display(),
        attribute = attribute_key,
        blocks = blocks.len(),
        "extracted attribute values"
    );
    Ok(blocks)
}

/// Same as [`extract`] for in-memory content; `path` is used in errors only
pub fn extract_from_str(
    content: &str,
    path: &Path,
    attribute_key: &str,
    pattern: Option<&Regex>,
) -> Result<Vec<ExtractedBlock>, ExtractError> {
    let body = hcl::parse(content).map_err(|source| ExtractError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut blocks = Vec::new();

    for block in body.blocks().filter(|b| b.identifier() == MODULE_BLOCK) {
        let name = block
            .labels()
            .first()
            .ok_or_else(|| ExtractError::MissingLabel {
                path: path.to_path_buf(),
            })?
            .as_str();

        let Some(attribute) = block.body().attributes().find(|a| a.key() == attribute_key)
        else {
            continue;
        };

        let value = Literal::from_expression(attribute.expr())
            .and_then(Literal::into_value)
            .map_err(|source| ExtractError::Value {
                path: path.to_path_buf(),
                module: name.to_string(),
                attribute: attribute_key.to_string(),
                source,
            })?;

        blocks.push(ExtractedBlock {
            name: name.to_string(),
            value: normalize(value, pattern),
        });
    }

    Ok(blocks)
}

/// Replace `value` with the first capture group of `pattern`, if any
pub fn normalize(value: String, pattern: Option<&Regex>) -> String {
    let Some(pattern) = pattern else {
        return value;
    };

    match pattern.captures(&value).and_then(|caps| caps.get(1)) {
        Some(group) => group.as_str().to_string(),
        None => value,
    }
}

fn format_number(n: &hcl::Number) -> String {
    // Float-typed numbers never go through the integer accessors, which
    // saturate above i64::MAX.
    if n.is_f64() {
        return match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.0}"),
            Some(f) => format_general(f),
            None => n.to_string(),
        };
    }

    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }

    n.to_string()
}

/// Shortest round-trip digits, switching to exponent notation for very
/// large or very small magnitudes (`1.5e+06`, `2.5e-05`).
///
/// Plain notation is kept for decimal exponents in `-4..6`, the `%g`
/// threshold for shortest-digit formatting.
fn format_general(f: f64) -> String {
    let scientific = format!("{f:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if (-4..6).contains(&exponent) {
        f.to_string()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}

fn expression_kind(expr: &Expression) -> &'static str {
    match expr {
        Expression::Array(_) => "array",
        Expression::Object(_) => "object",
        Expression::Variable(_) => "variable",
        Expression::Traversal(_) => "traversal",
        Expression::FuncCall(_) => "function call",
        Expression::Parenthesis(_) => "parenthesized expression",
        Expression::Conditional(_) => "conditional",
        Expression::Operation(_) => "operation",
        Expression::ForExpr(_) => "for expression",
        _ => "expression",
    }
}
