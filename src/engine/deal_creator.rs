use std::sync::Arc;

use tracing::{info, warn};

use crate::models::{Deal, DealError, DealRequest, NewDeal};
use crate::storage::DealStore;
use crate::validation::DealValidator;

/// Creates one deal at a time, failing with a single error instead of a report.
pub struct DealCreator<S: DealStore> {
    storage: Arc<S>,
    validator: DealValidator
}

impl<S: DealStore> DealCreator<S> {
    pub fn new(storage: Arc<S>, validator: DealValidator) -> Self {
        Self { storage, validator }
    }

    /// Checks for a duplicate, validates, then stores the deal.
    ///
    /// # Errors
    /// - `DealError::Duplicate` if the ID is already stored.
    /// - `DealError::Validation` if any structural rule fails.
    /// - `DealError::Storage` for store failures, passed through as they occur.
    ///
    /// Nothing is written when an error is returned.
    pub fn create(&self, request: DealRequest) -> Result<Deal, DealError> {
        info!("Creating FX deal with ID: {:?}", request.id());

        if let Some(deal_unique_id) = request.id() {
            if self.storage.exists(deal_unique_id)? {
                warn!("Duplicate deal detected: {deal_unique_id}");
                return Err(DealError::duplicate(deal_unique_id));
            }
        }

        self.validator.validate_or_fail(&request)?;

        let deal = self.storage.save(NewDeal::try_from(request)?)?;
        info!("Successfully created FX deal: {}", deal.deal_unique_id);

        Ok(deal)
    }

    pub fn find(&self, deal_unique_id: &str) -> Result<Deal, DealError> {
        self.storage.find(deal_unique_id)?
            .ok_or_else(|| DealError::not_found(deal_unique_id))
    }
}
