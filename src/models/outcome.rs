use serde::{Deserialize, Serialize};

use crate::models::Deal;
use crate::types::DealId;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    ValidationError,
    Duplicate,
    ProcessingError
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedDeal {
    pub deal_unique_id: Option<DealId>,
    pub reason: String,
    pub failure_kind: FailureKind
}

/// Result of running one record through the import pipeline.
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Imported(Deal),
    Duplicate,
    Invalid(Vec<String>),
    Failed(String)
}

/// Summary of a single batch import. Built fresh for every batch, never persisted.
///
/// `success_count + failed_count == total_processed` always holds, and duplicates
/// are counted among the failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    pub total_processed: usize,
    pub success_count: usize,
    pub failed_count: usize,
    pub duplicate_count: usize,
    pub successful_ids: Vec<DealId>,
    pub failures: Vec<FailedDeal>
}

impl BatchOutcome {
    /// Folds one record's outcome into the summary, preserving submission order.
    pub fn record(&mut self, deal_unique_id: Option<DealId>, outcome: RecordOutcome) {
        self.total_processed += 1;

        let (reason, failure_kind) = match outcome {
            RecordOutcome::Imported(deal) => {
                self.successful_ids.push(deal.deal_unique_id);
                self.success_count += 1;
                return;
            }
            RecordOutcome::Duplicate => {
                self.duplicate_count += 1;
                ("Deal already exists".to_string(), FailureKind::Duplicate)
            }
            RecordOutcome::Invalid(violations) => (violations.join(", "), FailureKind::ValidationError),
            RecordOutcome::Failed(cause) => (format!("Processing error: {cause}"), FailureKind::ProcessingError)
        };

        self.failures.push(FailedDeal { deal_unique_id, reason, failure_kind });
        self.failed_count += 1;
    }
}
