//! Batch generation: one roster source in, one SQL artifact out.
//!
//! A single sequential pass drives the loader, folds every row into a
//! [`RowOutcome`], and accumulates statement text in input order. Nothing is
//! streamed to the destination: the artifact is rendered in memory and
//! written once, so a fatal failure never leaves a partial batch behind.

use std::{fs, path::PathBuf};

use anyhow::Result;
use chrono::Local;
use encoding_rs::Encoding;
use log::{info, warn};

use crate::{
    cli::GenerateArgs,
    error::SyncError,
    io_utils,
    loader::RecordLoader,
    schema::{PLATFORM_FLAG_COLUMNS, TableSchema},
    statement::{self, RowOutcome, SkipReason},
};

/// Explicit run configuration, built once and passed through; there is no
/// process-wide mutable state behind it.
pub struct BatchConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub delimiter: u8,
    pub encoding: &'static Encoding,
    pub schema: TableSchema,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
}

pub fn execute(args: &GenerateArgs) -> Result<()> {
    let config = BatchConfig {
        source: args.input.clone(),
        destination: args.output.clone(),
        delimiter: io_utils::resolve_input_delimiter(&args.input, args.delimiter),
        encoding: io_utils::resolve_encoding(args.input_encoding.as_deref())?,
        schema: TableSchema::employees(),
    };
    info!(
        "Generating UPSERT batch from '{}' (delimiter '{}')",
        config.source.display(),
        io_utils::printable_delimiter(config.delimiter)
    );
    let report = run(&config)?;
    info!(
        "Wrote {} statement(s) to {:?} ({} row(s) skipped)",
        report.processed, config.destination, report.skipped
    );
    Ok(())
}

pub fn run(config: &BatchConfig) -> Result<BatchReport> {
    let loader = RecordLoader::open(&config.source, config.delimiter, config.encoding)?;

    let mut statements = Vec::new();
    let mut report = BatchReport::default();
    for (idx, item) in loader.enumerate() {
        let row = idx + 1;
        let outcome = match item {
            Ok(record) => statement::build_upsert(&record, &config.schema),
            Err(err) => RowOutcome::Skip {
                row,
                reason: SkipReason::ReadFailure(format!("{err:#}")),
            },
        };
        match outcome {
            RowOutcome::Statement(sql) => {
                statements.push(sql);
                report.processed += 1;
            }
            RowOutcome::Skip { row, reason } => {
                warn!("Row {row}: {reason}, skipping");
                report.skipped += 1;
            }
        }
    }

    let artifact = render_artifact(&config.schema, &statements);
    fs::write(&config.destination, artifact).map_err(|source| SyncError::DestinationWrite {
        path: config.destination.clone(),
        source,
    })?;
    Ok(report)
}

fn render_artifact(schema: &TableSchema, statements: &[String]) -> String {
    let mut artifact = String::new();
    artifact.push_str("-- Employee roster UPSERT batch\n");
    artifact.push_str(&format!(
        "-- Target table: {} (conflict key {})\n",
        schema.table, schema.conflict_key
    ));
    artifact.push_str(&format!(
        "-- Generated: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    artifact.push_str(&format!(
        "-- Includes platform flags: {}\n",
        PLATFORM_FLAG_COLUMNS.join(", ")
    ));
    for statement in statements {
        artifact.push('\n');
        artifact.push_str(statement);
        artifact.push('\n');
    }
    artifact
}
