use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::ingest::IngestError;
use crate::models::DealRequest;

#[derive(Debug, Deserialize)]
struct BatchImportRequest {
    #[serde(default)]
    deals: Vec<DealRequest>
}

/// A CSV row keeps the amount as text so that it is parsed as an exact decimal.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvDealRow {
    deal_unique_id: Option<String>,
    from_currency_iso_code: Option<String>,
    to_currency_iso_code: Option<String>,
    deal_timestamp: Option<NaiveDateTime>,
    deal_amount: Option<String>
}

impl CsvDealRow {
    fn into_request(self, row: usize) -> Result<DealRequest, IngestError> {
        let deal_amount = match self.deal_amount {
            Some(value) => Some(Decimal::from_str(value.trim())
                .map_err(|_| IngestError::InvalidAmount { row, value })?),
            None => None
        };

        Ok(DealRequest {
            deal_unique_id: self.deal_unique_id,
            from_currency_iso_code: self.from_currency_iso_code,
            to_currency_iso_code: self.to_currency_iso_code,
            deal_timestamp: self.deal_timestamp,
            deal_amount
        })
    }
}

/// Reads a batch of candidate deals from `path`.
///
/// `.json` files hold `{"deals": [...]}`; anything else is read as CSV with a camelCase
/// header row. A malformed file rejects the whole batch, as does an empty one.
pub fn read_batch(path: impl AsRef<Path>) -> Result<Vec<DealRequest>, IngestError> {
    let path = path.as_ref();
    let file = BufReader::new(File::open(path)?);

    let deals = if is_json(path) {
        serde_json::from_reader::<_, BatchImportRequest>(file)?.deals
    } else {
        read_csv_rows(file)?
    };

    if deals.is_empty() {
        return Err(IngestError::EmptyBatch);
    }

    info!("Read {} deals from {}", deals.len(), path.display());

    Ok(deals)
}

/// Reads a single candidate deal from a JSON file.
pub fn read_deal(path: impl AsRef<Path>) -> Result<DealRequest, IngestError> {
    let file = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(file)?)
}

fn read_csv_rows(file: BufReader<File>) -> Result<Vec<DealRequest>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_reader(file);

    reader.deserialize::<CsvDealRow>()
        .enumerate()
        .map(|(index, result)| result?.into_request(index + 1))
        .collect()
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"))
}
