use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::models::{BatchOutcome, DealError, DealRequest, NewDeal, RecordOutcome};
use crate::storage::DealStore;
use crate::validation::DealValidator;

/// Imports a batch of candidate deals with per-record isolation.
///
/// Records are processed one at a time in submission order. A record that is a
/// duplicate, invalid, or fails in the store is reported and skipped; earlier
/// writes are never rolled back and later records are still processed.
pub struct BatchImporter<S: DealStore> {
    storage: Arc<S>,
    validator: DealValidator
}

impl<S: DealStore> BatchImporter<S> {
    pub fn new(storage: Arc<S>, validator: DealValidator) -> Self {
        Self { storage, validator }
    }

    /// Runs every record through duplicate check, validation and save.
    ///
    /// Never fails; the outcome lists successes and failures in submission order.
    pub fn import_batch(&self, requests: Vec<DealRequest>) -> BatchOutcome {
        info!("Starting batch import of {} deals", requests.len());

        let mut outcome = BatchOutcome::default();

        for request in requests {
            let deal_unique_id = request.deal_unique_id.clone();

            let record_outcome = self.import_record(request).unwrap_or_else(|error| {
                error!("Error processing deal {:?}: {error}", deal_unique_id);
                RecordOutcome::Failed(error.to_string())
            });

            outcome.record(deal_unique_id, record_outcome);
        }

        info!(
            "Batch import completed: {} successful, {} failed, {} duplicates",
            outcome.success_count, outcome.failed_count, outcome.duplicate_count
        );

        outcome
    }

    fn import_record(&self, request: DealRequest) -> Result<RecordOutcome, DealError> {
        if let Some(deal_unique_id) = request.id() {
            //NOTE: The lookup sees writes made earlier in this batch, so a repeated ID is a duplicate
            if self.storage.exists(deal_unique_id)? {
                warn!("Skipping duplicate deal: {deal_unique_id}");
                return Ok(RecordOutcome::Duplicate);
            }
        }

        let violations = self.validator.validate(&request);

        if !violations.is_empty() {
            debug!("Validation failed for deal {:?}: {:?}", request.id(), violations);
            return Ok(RecordOutcome::Invalid(violations));
        }

        let deal = self.storage.save(NewDeal::try_from(request)?)?;
        debug!("Successfully imported deal: {}", deal.deal_unique_id);

        Ok(RecordOutcome::Imported(deal))
    }
}
