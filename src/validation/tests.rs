use super::DealValidator;
use crate::models::{DealError, DealRequest};
use crate::types::CurrencyTable;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, NaiveDateTime, Utc};
use rust_decimal::Decimal;

fn create_validator() -> DealValidator {
    DealValidator::new(Arc::new(CurrencyTable::iso_4217()))
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn create_valid_request() -> Result<DealRequest> {
    Ok(DealRequest {
        deal_unique_id: Some("DEAL-12345".to_string()),
        from_currency_iso_code: Some("USD".to_string()),
        to_currency_iso_code: Some("EUR".to_string()),
        deal_timestamp: Some(now() - Duration::minutes(5)),
        deal_amount: Some(Decimal::from_str("1000.50")?)
    })
}

fn with_amount(amount: &str) -> Result<DealRequest> {
    let mut request = create_valid_request()?;
    request.deal_amount = Some(Decimal::from_str(amount)?);
    Ok(request)
}

fn any_contains(violations: &[String], fragment: &str) -> bool {
    violations.iter().any(|violation| violation.contains(fragment))
}

#[test]
fn test_valid_deal_has_no_violations() -> Result<()> {
    let validator = create_validator();
    let request = create_valid_request()?;

    assert!(validator.validate(&request).is_empty());
    assert!(validator.validate(&request).is_empty());

    Ok(())
}

#[test]
fn test_missing_deal_unique_id_is_reported_once() -> Result<()> {
    let mut request = create_valid_request()?;
    request.deal_unique_id = None;

    let violations = create_validator().validate(&request);

    assert_eq!(violations, vec!["dealUniqueId: Deal unique ID is required"]);

    Ok(())
}

#[test]
fn test_blank_deal_unique_id_is_rejected() -> Result<()> {
    let validator = create_validator();

    for blank in ["", "   ", "\t"] {
        let mut request = create_valid_request()?;
        request.deal_unique_id = Some(blank.to_string());

        let violations = validator.validate(&request);

        assert!(any_contains(&violations, "Deal unique ID cannot be blank"), "{blank:?} should be blank");
    }

    Ok(())
}

#[test]
fn test_unknown_currencies_are_rejected_on_both_sides() -> Result<()> {
    let validator = create_validator();

    let mut request = create_valid_request()?;
    request.from_currency_iso_code = Some("XXX".to_string());
    request.to_currency_iso_code = Some("ABC".to_string());

    let violations = validator.validate(&request);

    assert_eq!(violations, vec![
        "fromCurrencyIsoCode: Currency code 'XXX' is not a valid ISO 4217 code",
        "toCurrencyIsoCode: Currency code 'ABC' is not a valid ISO 4217 code"
    ]);

    Ok(())
}

#[test]
fn test_currency_codes_must_have_three_characters() -> Result<()> {
    let validator = create_validator();

    for code in ["US", "USDD"] {
        let mut request = create_valid_request()?;
        request.from_currency_iso_code = Some(code.to_string());

        assert!(any_contains(&validator.validate(&request), "exactly 3 characters"));
    }

    let mut request = create_valid_request()?;
    request.to_currency_iso_code = Some("   ".to_string());

    assert!(any_contains(&validator.validate(&request), "Must be a valid 3-letter ISO 4217 code"));

    Ok(())
}

#[test]
fn test_currency_codes_with_symbols_or_digits_are_rejected() -> Result<()> {
    let validator = create_validator();

    for code in ["US$", "U-D", "US1", "12D"] {
        let mut request = create_valid_request()?;
        request.from_currency_iso_code = Some(code.to_string());

        assert!(any_contains(&validator.validate(&request), "not a valid ISO 4217 code"), "{code} should be rejected");
    }

    Ok(())
}

#[test]
fn test_lowercase_and_padded_currency_codes_are_accepted() -> Result<()> {
    let validator = create_validator();

    let mut request = create_valid_request()?;
    request.from_currency_iso_code = Some("usd".to_string());
    request.to_currency_iso_code = Some(" gbp ".to_string());

    assert!(validator.validate(&request).is_empty());

    Ok(())
}

#[test]
fn test_missing_currencies_are_required() -> Result<()> {
    let mut request = create_valid_request()?;
    request.from_currency_iso_code = None;
    request.to_currency_iso_code = None;

    let violations = create_validator().validate(&request);

    assert_eq!(violations, vec![
        "fromCurrencyIsoCode: From currency ISO code is required",
        "toCurrencyIsoCode: To currency ISO code is required"
    ]);

    Ok(())
}

#[test]
fn test_timestamp_equal_to_now_is_accepted() -> Result<()> {
    let validator = create_validator();
    let instant = now();

    let mut request = create_valid_request()?;
    request.deal_timestamp = Some(instant);

    assert!(validator.validate_at(&request, instant).is_empty());

    Ok(())
}

#[test]
fn test_timestamp_in_the_future_is_rejected() -> Result<()> {
    let validator = create_validator();
    let instant = now();

    let mut request = create_valid_request()?;
    request.deal_timestamp = Some(instant + Duration::days(1));

    let violations = validator.validate_at(&request, instant);

    assert_eq!(violations, vec!["dealTimestamp: Deal timestamp cannot be in the future"]);

    request.deal_timestamp = Some(instant + Duration::seconds(1));
    assert!(any_contains(&validator.validate_at(&request, instant), "cannot be in the future"));

    Ok(())
}

#[test]
fn test_past_timestamps_are_accepted() -> Result<()> {
    let mut request = create_valid_request()?;
    request.deal_timestamp = Some(now() - Duration::days(1));

    assert!(create_validator().validate(&request).is_empty());

    Ok(())
}

#[test]
fn test_missing_timestamp_is_required() -> Result<()> {
    let mut request = create_valid_request()?;
    request.deal_timestamp = None;

    assert_eq!(create_validator().validate(&request), vec!["dealTimestamp: Deal timestamp is required"]);

    Ok(())
}

#[test]
fn test_minimum_amount_is_accepted() -> Result<()> {
    assert!(create_validator().validate(&with_amount("0.0001")?).is_empty());

    Ok(())
}

#[test]
fn test_amount_below_minimum_is_rejected() -> Result<()> {
    let violations = create_validator().validate(&with_amount("0.00001")?);

    assert!(any_contains(&violations, "at least 0.0001"));
    assert!(!any_contains(&violations, "positive number"));

    Ok(())
}

#[test]
fn test_negative_amount_is_rejected() -> Result<()> {
    let violations = create_validator().validate(&with_amount("-100.00")?);

    assert!(any_contains(&violations, "positive number"));
    assert!(any_contains(&violations, "at least 0.0001"));

    Ok(())
}

#[test]
fn test_zero_amount_is_rejected() -> Result<()> {
    let violations = create_validator().validate(&with_amount("0")?);

    assert!(any_contains(&violations, "positive number"));

    Ok(())
}

#[test]
fn test_amount_precision_limits() -> Result<()> {
    let validator = create_validator();

    assert!(validator.validate(&with_amount("999999999999999.9999")?).is_empty());
    assert!(validator.validate(&with_amount("1000.50000000")?).is_empty());

    assert!(any_contains(&validator.validate(&with_amount("1000000000000000")?), "at most 15 integer digits"));
    assert!(any_contains(&validator.validate(&with_amount("1.00001")?), "4 decimal places"));

    Ok(())
}

#[test]
fn test_missing_amount_is_required() -> Result<()> {
    let mut request = create_valid_request()?;
    request.deal_amount = None;

    assert_eq!(create_validator().validate(&request), vec!["dealAmount: Deal amount is required"]);

    Ok(())
}

#[test]
fn test_all_missing_fields_report_one_violation_each_in_sorted_order() {
    let violations = create_validator().validate(&DealRequest::default());

    assert_eq!(violations, vec![
        "dealAmount: Deal amount is required",
        "dealTimestamp: Deal timestamp is required",
        "dealUniqueId: Deal unique ID is required",
        "fromCurrencyIsoCode: From currency ISO code is required",
        "toCurrencyIsoCode: To currency ISO code is required"
    ]);
}

#[test]
fn test_validate_or_fail_carries_joined_violations() -> Result<()> {
    let validator = create_validator();

    validator.validate_or_fail(&create_valid_request()?)?;

    let mut request = create_valid_request()?;
    request.deal_unique_id = None;
    request.from_currency_iso_code = Some("XXX".to_string());

    let result = validator.validate_or_fail(&request);

    assert!(matches!(result, Err(DealError::Validation { ref violations, .. }) if violations.len() == 2));

    let message = result.err().map(|error| error.to_string()).unwrap_or_default();
    assert_eq!(
        message,
        "FX deal validation failed: dealUniqueId: Deal unique ID is required, fromCurrencyIsoCode: Currency code 'XXX' is not a valid ISO 4217 code"
    );

    Ok(())
}
