use std::io;

use thiserror::Error;

use crate::types::ColumnName;

/// Error type for registry loading and batch input validation failures.
///
/// Per-row domain conditions (unparseable SKUs, missing names, collisions)
/// are not errors at this level; they are classified into
/// [`ErrorKind`](crate::batch::ErrorKind) diagnostics by the reconciler.
#[derive(Debug, Error)]
pub enum PairingError {
    /// The batch table lacks one or more required columns. This is the only
    /// batch-fatal condition; it aborts before any row is processed.
    #[error("batch input is missing required column(s): {}", missing.join(", "))]
    MissingColumns {
        /// Header names that were not found in the input table.
        missing: Vec<ColumnName>,
    },
    /// The card mapping resource was not a JSON object of string values.
    #[error("card mapping is malformed: {0}")]
    MalformedRegistry(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}
