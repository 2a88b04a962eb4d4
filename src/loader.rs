//! Row loading from a delimited roster export.
//!
//! The first line names the columns; every following line becomes an
//! [`EmployeeRecord`] mapping column name to raw cell text. The loader does
//! no type interpretation. Ragged rows are tolerated: fields beyond the
//! header are dropped, missing trailing fields read back as empty. A missing
//! source path is the one fatal condition here.

use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    path::Path,
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;

use crate::{error::SyncError, io_utils};

/// One input row: raw text cells keyed by header name. Immutable once built.
#[derive(Debug, Clone)]
pub struct EmployeeRecord {
    row: usize,
    values: HashMap<String, String>,
}

impl EmployeeRecord {
    /// 1-based data row position (the header line is not counted).
    pub fn row(&self) -> usize {
        self.row
    }

    /// Raw cell text for `column`, or the empty string when the field was
    /// absent from the row.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    #[cfg(test)]
    pub fn from_pairs(row: usize, pairs: &[(&str, &str)]) -> Self {
        EmployeeRecord {
            row,
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Lazy iterator over the records of one delimited source.
#[derive(Debug)]
pub struct RecordLoader {
    reader: csv::Reader<BufReader<File>>,
    headers: Vec<String>,
    encoding: &'static Encoding,
    row: usize,
}

impl RecordLoader {
    pub fn open(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Self> {
        if !path.exists() {
            return Err(SyncError::SourceNotFound(path.to_path_buf()).into());
        }
        let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
        let headers = io_utils::reader_headers(&mut reader, encoding)
            .with_context(|| format!("Reading header row of {path:?}"))?;
        Ok(RecordLoader {
            reader,
            headers,
            encoding,
            row: 0,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for RecordLoader {
    type Item = Result<EmployeeRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = csv::ByteRecord::new();
        match self.reader.read_byte_record(&mut record) {
            Ok(false) => None,
            Ok(true) => {
                self.row += 1;
                Some(self.build_record(&record))
            }
            Err(err) => {
                self.row += 1;
                Some(Err(err).with_context(|| format!("Reading data row {}", self.row)))
            }
        }
    }
}

impl RecordLoader {
    fn build_record(&self, record: &csv::ByteRecord) -> Result<EmployeeRecord> {
        let decoded = io_utils::decode_record(record, self.encoding)
            .with_context(|| format!("Decoding data row {}", self.row))?;
        // Zip stops at the header length, dropping overflow fields; absent
        // trailing fields simply never enter the map.
        let values = self
            .headers
            .iter()
            .zip(decoded)
            .map(|(name, value)| (name.clone(), value))
            .collect();
        Ok(EmployeeRecord {
            row: self.row,
            values,
        })
    }
}
