// Error taxonomy for parsing, projection, aggregation and persistence mapping.
// Unrecognized log lines are not errors; the parser skips them.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GcError {
    /// Caller asked for a view that is not in the projector's table.
    #[error("invalid view: {0}")]
    InvalidView(String),

    /// A stored row carries a record kind outside young-gen / full. Aborts the whole load.
    #[error("unsupported gc record kind: {0}")]
    UnsupportedKind(String),

    /// Summary statistics need at least one record.
    #[error("no gc records to summarise")]
    EmptyRecords,

    #[error("unknown log id: {0}")]
    UnknownLog(i64),
}
