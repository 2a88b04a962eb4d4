//! SQL literal coercion for raw CSV cells.
//!
//! Each function is total: malformed or missing input degrades to a safe
//! literal (`NULL` for text/numeric, `false` for boolean) instead of failing
//! the batch. The caller decides which coercion applies via the column
//! schema; nothing here inspects content to guess a type beyond the
//! documented numeric parse attempt.

/// Token exported by upstream tooling to mark a cell with no value.
/// Treated the same as an empty or absent field.
pub const MISSING_SENTINEL: &str = "nan";

pub const NULL_LITERAL: &str = "NULL";

fn is_missing(value: &str) -> bool {
    value.is_empty() || value == MISSING_SENTINEL
}

/// Renders `value` as a single-quoted SQL string literal with embedded
/// single quotes doubled. Missing input renders as `NULL`.
pub fn text_literal(value: &str) -> String {
    if is_missing(value) {
        return NULL_LITERAL.to_string();
    }
    format!("'{}'", value.replace('\'', "''"))
}

/// Renders `value` as a SQL numeric literal: integer form when the parsed
/// number has no fractional part, decimal form otherwise. Missing input and
/// parse failures (including non-finite parses such as `inf`) render as
/// `NULL` rather than aborting the batch.
pub fn numeric_literal(value: &str) -> String {
    if is_missing(value) {
        return NULL_LITERAL.to_string();
    }
    match value.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => {
            if parsed.fract() == 0.0 && parsed.abs() <= i64::MAX as f64 {
                (parsed as i64).to_string()
            } else {
                parsed.to_string()
            }
        }
        _ => NULL_LITERAL.to_string(),
    }
}

/// Renders `value` as a SQL boolean literal. Accepted truthy tokens after
/// lowercasing are `true`, `1`, `yes`, `si`, `sí`; everything else,
/// including missing input, renders as `false`.
pub fn boolean_literal(value: &str) -> String {
    if is_missing(value) {
        return "false".to_string();
    }
    let lowered = value.to_lowercase();
    match lowered.as_str() {
        "true" | "1" | "yes" | "si" | "sí" => "true",
        _ => "false",
    }
    .to_string()
}
