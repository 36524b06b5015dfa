use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};
use tracing::{debug, warn};

use crate::models::{DealError, DealRequest};
use crate::types::CurrencyTable;
use crate::validation::rules::{RuleContext, RULES};

/// Structural validation of candidate deals.
///
/// Every rule is evaluated, so one request can report several violations. Messages
/// take the form `"<field>: <message>"` and are returned sorted.
#[derive(Debug, Clone)]
pub struct DealValidator {
    currencies: Arc<CurrencyTable>
}

impl DealValidator {
    pub fn new(currencies: Arc<CurrencyTable>) -> Self {
        Self { currencies }
    }

    /// Validates against the current UTC instant. An empty result means the request is valid.
    pub fn validate(&self, request: &DealRequest) -> Vec<String> {
        self.validate_at(request, Utc::now().naive_utc())
    }

    /// Validates with `now` as the latest acceptable deal timestamp.
    pub fn validate_at(&self, request: &DealRequest, now: NaiveDateTime) -> Vec<String> {
        debug!("Validating FX deal: {:?}", request);

        let context = RuleContext {
            currencies: &self.currencies,
            now
        };

        let mut violations: Vec<String> = RULES.iter()
            .filter_map(|rule| {
                (rule.check)(request, &context).map(|message| format!("{}: {}", rule.field, message))
            })
            .collect();

        violations.sort();

        if !violations.is_empty() {
            warn!("FX deal validation failed with {} errors: {:?}", violations.len(), violations);
        }

        violations
    }

    /// # Errors
    /// Returns `DealError::Validation` carrying every violation when the request is invalid.
    pub fn validate_or_fail(&self, request: &DealRequest) -> Result<(), DealError> {
        let violations = self.validate(request);

        if violations.is_empty() {
            return Ok(());
        }

        Err(DealError::validation(request, violations))
    }
}
