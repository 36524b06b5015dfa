use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::errors::DealError;
use crate::types::DealId;

/// A candidate deal as submitted by an upstream trading system.
///
/// Every field is optional so that missing values can be reported by the validator
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRequest {
    pub deal_unique_id: Option<DealId>,
    pub from_currency_iso_code: Option<String>,
    pub to_currency_iso_code: Option<String>,
    /// UTC, `yyyy-MM-ddTHH:mm:ss`.
    pub deal_timestamp: Option<NaiveDateTime>,
    /// Read exactly, from either a JSON number or a string.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub deal_amount: Option<Decimal>
}

impl DealRequest {
    pub fn id(&self) -> Option<&str> {
        self.deal_unique_id.as_deref()
    }
}

/// A deal that passed validation, with currency codes normalized to uppercase.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeal {
    pub deal_unique_id: DealId,
    pub from_currency_iso_code: String,
    pub to_currency_iso_code: String,
    pub deal_timestamp: NaiveDateTime,
    pub deal_amount: Decimal
}

impl TryFrom<DealRequest> for NewDeal {
    type Error = DealError;

    fn try_from(request: DealRequest) -> Result<Self, Self::Error> {
        match request {
            DealRequest {
                deal_unique_id: Some(deal_unique_id),
                from_currency_iso_code: Some(from_currency),
                to_currency_iso_code: Some(to_currency),
                deal_timestamp: Some(deal_timestamp),
                deal_amount: Some(deal_amount)
            } => Ok(Self {
                deal_unique_id,
                from_currency_iso_code: from_currency.trim().to_ascii_uppercase(),
                to_currency_iso_code: to_currency.trim().to_ascii_uppercase(),
                deal_timestamp,
                deal_amount
            }),
            request => Err(DealError::incomplete(&request))
        }
    }
}

/// A deal as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub deal_unique_id: DealId,
    pub from_currency_iso_code: String,
    pub to_currency_iso_code: String,
    pub deal_timestamp: NaiveDateTime,
    #[serde(with = "rust_decimal::serde::str")]
    pub deal_amount: Decimal,
    /// Set once, when the deal is first written.
    pub created_at: NaiveDateTime,
    /// Set on every write.
    pub updated_at: NaiveDateTime
}

impl Deal {
    pub fn stored_at(deal: NewDeal, now: NaiveDateTime) -> Self {
        Self {
            deal_unique_id: deal.deal_unique_id,
            from_currency_iso_code: deal.from_currency_iso_code,
            to_currency_iso_code: deal.to_currency_iso_code,
            deal_timestamp: deal.deal_timestamp,
            deal_amount: deal.deal_amount,
            created_at: now,
            updated_at: now
        }
    }
}
