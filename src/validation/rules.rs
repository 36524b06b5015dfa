use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::DealRequest;
use crate::types::CurrencyTable;

const MAX_INTEGER_DIGITS: usize = 15;
const MAX_FRACTION_DIGITS: u32 = 4;

pub struct RuleContext<'a> {
    pub currencies: &'a CurrencyTable,
    pub now: NaiveDateTime
}

/// A single structural check. `check` yields the violation message, if any.
///
/// Every rule other than a field's "required" rule passes when the field is absent,
/// so a missing field reports exactly one violation.
pub struct Rule {
    pub field: &'static str,
    pub check: fn(&DealRequest, &RuleContext<'_>) -> Option<String>
}

pub const RULES: &[Rule] = &[
    Rule { field: "dealUniqueId", check: deal_unique_id_required },
    Rule { field: "dealUniqueId", check: deal_unique_id_not_blank },
    Rule { field: "fromCurrencyIsoCode", check: from_currency_required },
    Rule { field: "fromCurrencyIsoCode", check: from_currency_known },
    Rule { field: "toCurrencyIsoCode", check: to_currency_required },
    Rule { field: "toCurrencyIsoCode", check: to_currency_known },
    Rule { field: "dealTimestamp", check: deal_timestamp_required },
    Rule { field: "dealTimestamp", check: deal_timestamp_not_in_future },
    Rule { field: "dealAmount", check: deal_amount_required },
    Rule { field: "dealAmount", check: deal_amount_positive },
    Rule { field: "dealAmount", check: deal_amount_minimum },
    Rule { field: "dealAmount", check: deal_amount_digits }
];

fn violation(failed: bool, message: &str) -> Option<String> {
    failed.then(|| message.to_string())
}

fn deal_unique_id_required(request: &DealRequest, _: &RuleContext<'_>) -> Option<String> {
    violation(request.deal_unique_id.is_none(), "Deal unique ID is required")
}

fn deal_unique_id_not_blank(request: &DealRequest, _: &RuleContext<'_>) -> Option<String> {
    let id = request.id()?;
    violation(id.trim().is_empty(), "Deal unique ID cannot be blank")
}

fn from_currency_required(request: &DealRequest, _: &RuleContext<'_>) -> Option<String> {
    violation(request.from_currency_iso_code.is_none(), "From currency ISO code is required")
}

fn from_currency_known(request: &DealRequest, context: &RuleContext<'_>) -> Option<String> {
    currency_violation(request.from_currency_iso_code.as_deref()?, context.currencies)
}

fn to_currency_required(request: &DealRequest, _: &RuleContext<'_>) -> Option<String> {
    violation(request.to_currency_iso_code.is_none(), "To currency ISO code is required")
}

fn to_currency_known(request: &DealRequest, context: &RuleContext<'_>) -> Option<String> {
    currency_violation(request.to_currency_iso_code.as_deref()?, context.currencies)
}

fn currency_violation(code: &str, currencies: &CurrencyTable) -> Option<String> {
    let trimmed = code.trim();

    if trimmed.is_empty() {
        return Some("Invalid currency code. Must be a valid 3-letter ISO 4217 code".to_string());
    }

    if trimmed.chars().count() != 3 {
        return Some("Currency code must be exactly 3 characters".to_string());
    }

    if !currencies.contains(trimmed) {
        return Some(format!("Currency code '{code}' is not a valid ISO 4217 code"));
    }

    None
}

fn deal_timestamp_required(request: &DealRequest, _: &RuleContext<'_>) -> Option<String> {
    violation(request.deal_timestamp.is_none(), "Deal timestamp is required")
}

fn deal_timestamp_not_in_future(request: &DealRequest, context: &RuleContext<'_>) -> Option<String> {
    let timestamp = request.deal_timestamp?;
    violation(timestamp > context.now, "Deal timestamp cannot be in the future")
}

fn deal_amount_required(request: &DealRequest, _: &RuleContext<'_>) -> Option<String> {
    violation(request.deal_amount.is_none(), "Deal amount is required")
}

fn deal_amount_positive(request: &DealRequest, _: &RuleContext<'_>) -> Option<String> {
    let amount = request.deal_amount?;
    violation(amount <= Decimal::ZERO, "Deal amount must be a positive number")
}

fn deal_amount_minimum(request: &DealRequest, _: &RuleContext<'_>) -> Option<String> {
    let amount = request.deal_amount?;
    violation(amount < Decimal::new(1, MAX_FRACTION_DIGITS), "Deal amount must be at least 0.0001")
}

fn deal_amount_digits(request: &DealRequest, _: &RuleContext<'_>) -> Option<String> {
    //NOTE: Trailing zeros do not count as fractional digits, 1000.5000 has one.
    let amount = request.deal_amount?.abs().normalize();
    let integer_digits = integer_digit_count(amount.trunc());

    violation(
        integer_digits > MAX_INTEGER_DIGITS || amount.scale() > MAX_FRACTION_DIGITS,
        "Deal amount must have at most 15 integer digits and 4 decimal places"
    )
}

fn integer_digit_count(integer: Decimal) -> usize {
    if integer.is_zero() {
        0
    } else {
        integer.to_string().len()
    }
}
