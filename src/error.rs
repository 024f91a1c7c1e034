//! Errors raised at the crate edge (loading inputs, writing outputs).
//!
//! The projection engine itself never fails; see `projection::engine`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DcfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
}

pub type LoadResult<T> = Result<T, DcfError>;
