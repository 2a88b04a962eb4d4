//! Fatal error kinds for a synchronization run.
//!
//! Per-row problems never appear here: they are modeled as skip outcomes and
//! counters, not errors. Only a missing source or an unwritable destination
//! terminates a run.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("source file not found: {0:?}")]
    SourceNotFound(PathBuf),
    #[error("failed to write destination {path:?}")]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
