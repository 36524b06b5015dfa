mod batch_reader;

use thiserror::Error;

pub use batch_reader::{read_batch, read_deal};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Deals list cannot be empty")]
    EmptyBatch,
    #[error("Row {row} has an invalid deal amount '{value}'")]
    InvalidAmount {
        row: usize,
        value: String
    },
    #[error("Cannot read batch file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed JSON batch: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed CSV batch: {0}")]
    Csv(#[from] csv::Error)
}
