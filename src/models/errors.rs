use crate::models::DealRequest;
use crate::storage::StorageError;
use crate::types::DealId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DealError {
    #[error("Deal with ID '{deal_unique_id}' already exists")]
    Duplicate {
        deal_unique_id: DealId
    },
    #[error("FX deal validation failed: {}", violations.join(", "))]
    Validation {
        deal_unique_id: Option<DealId>,
        violations: Vec<String>
    },
    #[error("Deal with ID '{deal_unique_id}' not found")]
    NotFound {
        deal_unique_id: DealId
    },
    #[error(transparent)]
    Storage(#[from] StorageError)
}

impl DealError {
    pub fn duplicate(deal_unique_id: &str) -> Self {
        Self::Duplicate { deal_unique_id: deal_unique_id.to_string() }
    }

    pub fn validation(request: &DealRequest, violations: Vec<String>) -> Self {
        Self::Validation {
            deal_unique_id: request.deal_unique_id.clone(),
            violations
        }
    }

    pub fn not_found(deal_unique_id: &str) -> Self {
        Self::NotFound { deal_unique_id: deal_unique_id.to_string() }
    }

    /// A request reached normalization with a required field still missing.
    pub fn incomplete(request: &DealRequest) -> Self {
        let missing = [
            ("dealUniqueId", request.deal_unique_id.is_none()),
            ("fromCurrencyIsoCode", request.from_currency_iso_code.is_none()),
            ("toCurrencyIsoCode", request.to_currency_iso_code.is_none()),
            ("dealTimestamp", request.deal_timestamp.is_none()),
            ("dealAmount", request.deal_amount.is_none())
        ];

        let violations = missing.iter()
            .filter(|(_, is_missing)| *is_missing)
            .map(|(field, _)| format!("{field}: is required"))
            .collect();

        Self::validation(request, violations)
    }
}
