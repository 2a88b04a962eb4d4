//! Roster schema evolution: inserting new nullable columns.
//!
//! Each `new_column:anchor_column` spec places the new column immediately
//! after its anchor, filling every existing row with an empty cell. A column
//! that already exists is left alone, so re-running the command on an
//! already-augmented file changes neither the header set nor any row.

use anyhow::{Context, Result, anyhow, bail};
use log::info;

use crate::{cli::AugmentArgs, error::SyncError, io_utils};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddColumnSpec {
    pub name: String,
    pub anchor: String,
}

pub fn parse_add_spec(raw: &str) -> Result<AddColumnSpec> {
    let (name, anchor) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid column spec '{raw}', expected 'new_column:anchor_column'"))?;
    let (name, anchor) = (name.trim(), anchor.trim());
    if name.is_empty() || anchor.is_empty() {
        bail!("Invalid column spec '{raw}', expected 'new_column:anchor_column'");
    }
    Ok(AddColumnSpec {
        name: name.to_string(),
        anchor: anchor.to_string(),
    })
}

pub fn execute(args: &AugmentArgs) -> Result<()> {
    let specs = args
        .add
        .iter()
        .map(|raw| parse_add_spec(raw))
        .collect::<Result<Vec<_>>>()?;

    if !args.input.exists() {
        return Err(SyncError::SourceNotFound(args.input.clone()).into());
    }
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;

    let mut reader = io_utils::open_csv_reader_from_path(&args.input, delimiter)?;
    let mut headers = io_utils::reader_headers(&mut reader, encoding)
        .with_context(|| format!("Reading header row of {:?}", args.input))?;
    let mut rows = Vec::new();
    for (idx, record) in reader.byte_records().enumerate() {
        let record =
            record.with_context(|| format!("Reading row {} in {:?}", idx + 2, args.input))?;
        let mut decoded = io_utils::decode_record(&record, encoding)?;
        decoded.resize(headers.len(), String::new());
        rows.push(decoded);
    }

    for spec in &specs {
        insert_column(&mut headers, &mut rows, spec)?;
    }

    let mut writer = io_utils::open_csv_writer(&args.output, delimiter)?;
    writer
        .write_record(headers.iter())
        .context("Writing output headers")?;
    for row in &rows {
        writer.write_record(row.iter()).map_err(|err| {
            SyncError::DestinationWrite {
                path: args.output.clone(),
                source: std::io::Error::other(err),
            }
        })?;
    }
    writer.flush().map_err(|source| SyncError::DestinationWrite {
        path: args.output.clone(),
        source,
    })?;

    info!(
        "Wrote {} row(s) x {} column(s) to {:?}",
        rows.len(),
        headers.len(),
        args.output
    );
    Ok(())
}

fn insert_column(
    headers: &mut Vec<String>,
    rows: &mut [Vec<String>],
    spec: &AddColumnSpec,
) -> Result<()> {
    if headers.iter().any(|h| h == &spec.name) {
        info!("Column '{}' already present, skipping", spec.name);
        return Ok(());
    }
    let anchor_idx = headers
        .iter()
        .position(|h| h == &spec.anchor)
        .ok_or_else(|| {
            anyhow!(
                "Anchor column '{}' not found for new column '{}'",
                spec.anchor,
                spec.name
            )
        })?;
    headers.insert(anchor_idx + 1, spec.name.clone());
    for row in rows.iter_mut() {
        row.insert(anchor_idx + 1, String::new());
    }
    info!("Column '{}' added after '{}'", spec.name, spec.anchor);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_spec_splits_on_the_first_colon() {
        let spec = parse_add_spec("glovo:flota").expect("spec");
        assert_eq!(spec.name, "glovo");
        assert_eq!(spec.anchor, "flota");
        assert!(parse_add_spec("glovo").is_err());
        assert!(parse_add_spec(":flota").is_err());
        assert!(parse_add_spec("glovo:").is_err());
    }

    #[test]
    fn insert_column_places_the_new_column_after_its_anchor() {
        let mut headers = vec!["a".to_string(), "flota".to_string(), "z".to_string()];
        let mut rows = vec![vec!["1".to_string(), "2".to_string(), "3".to_string()]];
        let spec = parse_add_spec("glovo:flota").unwrap();
        insert_column(&mut headers, &mut rows, &spec).expect("insert");
        assert_eq!(headers, ["a", "flota", "glovo", "z"]);
        assert_eq!(rows[0], ["1", "2", "", "3"]);
    }

    #[test]
    fn insert_column_is_idempotent() {
        let mut headers = vec!["flota".to_string(), "glovo".to_string()];
        let mut rows = vec![vec!["f".to_string(), "g".to_string()]];
        let spec = parse_add_spec("glovo:flota").unwrap();
        insert_column(&mut headers, &mut rows, &spec).expect("insert");
        assert_eq!(headers, ["flota", "glovo"]);
        assert_eq!(rows[0], ["f", "g"]);
    }

    #[test]
    fn insert_column_fails_when_the_anchor_is_absent() {
        let mut headers = vec!["a".to_string()];
        let mut rows: Vec<Vec<String>> = vec![];
        let spec = parse_add_spec("glovo:flota").unwrap();
        assert!(insert_column(&mut headers, &mut rows, &spec).is_err());
    }
}
