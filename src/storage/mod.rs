mod deal_storage;

use thiserror::Error;

use crate::models::{Deal, NewDeal};

pub use deal_storage::DealStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Deal with ID '{0}' violates the unique key constraint")]
    UniqueViolation(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Store snapshot error: {0}")]
    Csv(#[from] csv::Error)
}

/// Keyed, durable storage for deals.
///
/// `exists` must observe every successful `save`, including writes made earlier in
/// the same batch. `save` enforces key uniqueness on its own.
pub trait DealStore: Send + Sync + 'static {
    fn exists(&self, deal_unique_id: &str) -> Result<bool, StorageError>;
    fn save(&self, deal: NewDeal) -> Result<Deal, StorageError>;
    fn find(&self, deal_unique_id: &str) -> Result<Option<Deal>, StorageError>;
}
