//! Target table layout for the employee roster.
//!
//! The schema is process-wide constant configuration: the `employees` table
//! shape is fixed at design time and never derived from input headers. The
//! INSERT column list, the VALUES list, and the ON CONFLICT update clause
//! are all generated from the same traversal of [`TableSchema::columns`], so
//! their order can never drift apart.

use std::{fmt, fs::File, path::Path};

use anyhow::{Context, Result};
use serde::Serialize;

/// How a raw cell is coerced into a SQL literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Numeric,
    Boolean,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnKind::Text => "text",
            ColumnKind::Numeric => "numeric",
            ColumnKind::Boolean => "boolean",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSchema {
    pub table: &'static str,
    pub conflict_key: &'static str,
    pub columns: Vec<Column>,
}

/// Platform availability flags added to the roster after the original
/// template was designed. They ride at the end of the column list and drive
/// both the batch header comment and the augmenter defaults.
pub const PLATFORM_FLAG_COLUMNS: &[&str] = &["glovo", "uber_eats"];

use ColumnKind::{Boolean, Numeric, Text};

const EMPLOYEE_COLUMNS: &[(&str, ColumnKind)] = &[
    ("id_glovo", Text),
    ("email_glovo", Text),
    ("turno_1", Text),
    ("nombre", Text),
    ("apellido", Text),
    ("telefono", Text),
    ("email", Text),
    ("horas", Numeric),
    ("cdp", Numeric),
    ("complementaries", Text),
    ("ciudad", Text),
    ("citycode", Text),
    ("dni_nie", Text),
    ("iban", Text),
    ("direccion", Text),
    ("vehiculo", Text),
    ("naf", Text),
    ("fecha_alta_seg_soc", Text),
    ("status_baja", Text),
    ("estado_ss", Text),
    ("informado_horario", Boolean),
    ("cuenta_divilo", Text),
    ("proxima_asignacion_slots", Text),
    ("jefe_trafico", Text),
    ("coments_jefe_de_trafico", Text),
    ("incidencias", Text),
    ("fecha_incidencia", Text),
    ("faltas_no_check_in_en_dias", Numeric),
    ("cruce", Text),
    ("status", Text),
    ("penalization_start_date", Text),
    ("penalization_end_date", Text),
    ("original_hours", Numeric),
    ("flota", Text),
    ("vacaciones_disfrutadas", Numeric),
    ("vacaciones_pendientes", Numeric),
    ("turno_2", Text),
    ("puesto", Text),
    ("glovo", Text),
    ("uber_eats", Text),
];

impl TableSchema {
    /// The `employees` table as provisioned in the roster database,
    /// including the late-added platform flag columns.
    pub fn employees() -> Self {
        TableSchema {
            table: "employees",
            conflict_key: "id_glovo",
            columns: EMPLOYEE_COLUMNS
                .iter()
                .map(|&(name, kind)| Column { name, kind })
                .collect(),
        }
    }

    /// Every column except the conflict key, in schema order.
    pub fn non_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.name != self.conflict_key)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("Creating schema file {path:?}"))?;
        serde_json::to_writer_pretty(file, self).context("Writing schema JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employees_schema_starts_with_the_conflict_key() {
        let schema = TableSchema::employees();
        assert_eq!(schema.conflict_key, "id_glovo");
        assert_eq!(schema.columns[0].name, "id_glovo");
    }

    #[test]
    fn employees_schema_ends_with_the_platform_flags() {
        let schema = TableSchema::employees();
        let tail: Vec<&str> = schema
            .columns
            .iter()
            .rev()
            .take(PLATFORM_FLAG_COLUMNS.len())
            .rev()
            .map(|c| c.name)
            .collect();
        assert_eq!(tail, PLATFORM_FLAG_COLUMNS);
    }

    #[test]
    fn non_key_columns_excludes_exactly_the_conflict_key() {
        let schema = TableSchema::employees();
        let non_key: Vec<&str> = schema.non_key_columns().map(|c| c.name).collect();
        assert_eq!(non_key.len(), schema.columns.len() - 1);
        assert!(!non_key.contains(&"id_glovo"));
    }

    #[test]
    fn column_kinds_cover_the_counters_and_flags() {
        let schema = TableSchema::employees();
        let kind_of = |name: &str| {
            schema
                .columns
                .iter()
                .find(|c| c.name == name)
                .map(|c| c.kind)
                .unwrap()
        };
        assert_eq!(kind_of("horas"), ColumnKind::Numeric);
        assert_eq!(kind_of("vacaciones_pendientes"), ColumnKind::Numeric);
        assert_eq!(kind_of("informado_horario"), ColumnKind::Boolean);
        assert_eq!(kind_of("nombre"), ColumnKind::Text);
    }
}
