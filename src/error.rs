//! Error types for ledger loading and waterfall analysis

use thiserror::Error;

/// Everything that can go wrong between raw transaction text and a finished waterfall
#[derive(Debug, Error)]
pub enum WaterfallError {
    #[error("Malformed amount: {value:?}")]
    MalformedAmount { value: String },

    #[error("Malformed date: {value:?} (expected MM/DD/YYYY)")]
    MalformedDate { value: String },

    #[error("Unknown transaction kind: {value:?} (expected contribution or distribution)")]
    UnknownKind { value: String },

    #[error("Record {record}: {source}")]
    InvalidRecord {
        record: usize,
        #[source]
        source: Box<WaterfallError>,
    },

    #[error("No transactions found for commitment {0}")]
    UnknownCommitment(u32),

    #[error("Profit split is undefined for commitment {commitment_id}: distributions net of capital are zero")]
    UndefinedSplit { commitment_id: u32 },

    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WaterfallError {
    /// Attach a 1-based record position to a per-record error
    pub fn at_record(self, record: usize) -> Self {
        WaterfallError::InvalidRecord {
            record,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, WaterfallError>;
