//! Listing and exporting the built-in target schema.

use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::SchemaArgs,
    schema::{PLATFORM_FLAG_COLUMNS, TableSchema},
};

pub fn execute(args: &SchemaArgs) -> Result<()> {
    let schema = TableSchema::employees();
    info!(
        "Target table '{}' with {} column(s), conflict key '{}'",
        schema.table,
        schema.columns.len(),
        schema.conflict_key
    );
    for (idx, column) in schema.columns.iter().enumerate() {
        let marker = if column.name == schema.conflict_key {
            " (conflict key)"
        } else if PLATFORM_FLAG_COLUMNS.contains(&column.name) {
            " (platform flag)"
        } else {
            ""
        };
        info!("{:>3}. {} [{}]{}", idx + 1, column.name, column.kind, marker);
    }
    if let Some(meta) = &args.meta {
        schema
            .save(meta)
            .with_context(|| format!("Writing schema to {meta:?}"))?;
        info!("Schema JSON written to {meta:?}");
    }
    Ok(())
}
