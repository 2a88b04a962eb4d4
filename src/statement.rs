//! UPSERT statement assembly for one employee record.
//!
//! The builder is a pure transformation: it either produces the full
//! statement text for a record or a skip outcome for a record that cannot
//! identify itself. No per-row condition unwinds past this module; the
//! pipeline aggregates the outcomes into counters.

use std::fmt::{self, Write as _};

use itertools::Itertools;

use crate::{
    loader::EmployeeRecord,
    schema::{ColumnKind, TableSchema},
    sql,
};

/// Result of building one record: the statement text, or a skip with the
/// row's 1-based position and the reason.
#[derive(Debug)]
pub enum RowOutcome {
    Statement(String),
    Skip { row: usize, reason: SkipReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingConflictKey,
    ReadFailure(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingConflictKey => write!(f, "conflict key is empty"),
            SkipReason::ReadFailure(detail) => write!(f, "row could not be read ({detail})"),
        }
    }
}

/// Builds the INSERT … ON CONFLICT DO UPDATE block for one record.
///
/// The column list, the VALUES list, and the update clause all walk the same
/// schema traversal, so their order always matches. Every non-key column is
/// reassigned from `EXCLUDED`, and `updated_at` is stamped server-side
/// whether or not any field changed.
pub fn build_upsert(record: &EmployeeRecord, schema: &TableSchema) -> RowOutcome {
    let key = record.get(schema.conflict_key);
    if key.is_empty() || key == sql::MISSING_SENTINEL {
        return RowOutcome::Skip {
            row: record.row(),
            reason: SkipReason::MissingConflictKey,
        };
    }

    let columns = schema
        .columns
        .iter()
        .map(|c| format!("    {}", c.name))
        .chain(std::iter::once("    updated_at".to_string()))
        .join(",\n");

    let values = schema
        .columns
        .iter()
        .map(|c| format!("    {}", coerce(record.get(c.name), c.kind)))
        .chain(std::iter::once("    CURRENT_TIMESTAMP".to_string()))
        .join(",\n");

    let updates = schema
        .non_key_columns()
        .map(|c| format!("    {name} = EXCLUDED.{name}", name = c.name))
        .chain(std::iter::once(
            "    updated_at = CURRENT_TIMESTAMP".to_string(),
        ))
        .join(",\n");

    let mut statement = String::new();
    let _ = writeln!(
        statement,
        "-- Empleado: {} {} (ID: {})",
        record.get("nombre"),
        record.get("apellido"),
        key
    );
    let _ = writeln!(statement, "INSERT INTO {} (", schema.table);
    let _ = writeln!(statement, "{columns}");
    let _ = writeln!(statement, ") VALUES (");
    let _ = writeln!(statement, "{values}");
    let _ = writeln!(statement, ")");
    let _ = writeln!(statement, "ON CONFLICT ({}) DO UPDATE SET", schema.conflict_key);
    let _ = write!(statement, "{updates};");
    RowOutcome::Statement(statement)
}

fn coerce(value: &str, kind: ColumnKind) -> String {
    match kind {
        ColumnKind::Text => sql::text_literal(value),
        ColumnKind::Numeric => sql::numeric_literal(value),
        ColumnKind::Boolean => sql::boolean_literal(value),
    }
}
