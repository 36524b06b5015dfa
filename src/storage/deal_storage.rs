use crate::models::{Deal, NewDeal};
use crate::storage::{DealStore, StorageError};
use crate::types::DealId;
use chrono::Utc;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub struct DealStorage {
    cache: Arc<DashMap<DealId, Deal>>
}

impl DealStorage {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new())
        }
    }

    /// Restores a store from a CSV snapshot. A missing file yields an empty store.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let storage = Self::new();

        let file = match File::open(path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!("No deal store at {}, starting empty", path.display());
                return Ok(storage);
            }
            Err(error) => return Err(error.into())
        };

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(BufReader::new(file));

        for result in reader.deserialize::<Deal>() {
            let deal = result?;
            storage.cache.insert(deal.deal_unique_id.clone(), deal);
        }

        info!("Loaded {} deals from {}", storage.len(), path.display());

        Ok(storage)
    }

    /// Writes every stored deal, ordered by ID, as a CSV snapshot.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let path = path.as_ref();
        let mut deals = self.deals();
        deals.sort_by(|left, right| left.deal_unique_id.cmp(&right.deal_unique_id));

        let mut writer = WriterBuilder::new().from_writer(BufWriter::new(File::create(path)?));

        for deal in &deals {
            writer.serialize(deal)?;
        }

        writer.flush()?;
        info!("Wrote {} deals to {}", deals.len(), path.display());

        Ok(())
    }

    pub fn deals(&self) -> Vec<Deal> {
        self.cache.iter().map(|item| item.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for DealStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl DealStore for DealStorage {
    fn exists(&self, deal_unique_id: &str) -> Result<bool, StorageError> {
        Ok(self.cache.contains_key(deal_unique_id))
    }

    fn save(&self, deal: NewDeal) -> Result<Deal, StorageError> {
        //NOTE: The entry lock makes check-and-insert atomic, so a concurrent writer that got past
        //      the caller's existence check still cannot overwrite a stored deal.
        match self.cache.entry(deal.deal_unique_id.clone()) {
            Entry::Occupied(entry) => Err(StorageError::UniqueViolation(entry.key().clone())),
            Entry::Vacant(entry) => {
                let stored = Deal::stored_at(deal, Utc::now().naive_utc());
                debug!("Stored deal [{}]", stored.deal_unique_id);
                Ok(entry.insert(stored).value().clone())
            }
        }
    }

    fn find(&self, deal_unique_id: &str) -> Result<Option<Deal>, StorageError> {
        Ok(self.cache.get(deal_unique_id).map(|item| item.value().clone()))
    }
}
