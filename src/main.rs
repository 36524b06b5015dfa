mod engine;
mod ingest;
mod models;
mod storage;
mod types;
mod validation;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tokio::task::spawn_blocking;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{BatchImporter, DealCreator};
use crate::storage::DealStorage;
use crate::types::CurrencyTable;
use crate::validation::DealValidator;

const USAGE: &str = "\
Usage:
  fx-deal-importer import [store].csv [batch].csv|[batch].json [log_level:optional]
  fx-deal-importer create [store].csv [deal].json [log_level:optional]
  fx-deal-importer show [store].csv [deal_unique_id] [log_level:optional]
Available log levels: error, warn, info, debug, trace (default: error)";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 4 {
        eprintln!("{USAGE}");
        exit(1);
    }

    let (command, store_path, target) = (args[1].as_str(), args[2].clone(), args[3].clone());
    let log_level = args.get(4)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let storage = Arc::new(DealStorage::load_csv(&store_path)?);
    let validator = DealValidator::new(Arc::new(CurrencyTable::iso_4217()));

    match command {
        "import" => {
            let importer = BatchImporter::new(storage.clone(), validator);

            let timer = Instant::now();
            let outcome = spawn_blocking(move || -> Result<_> {
                let deals = ingest::read_batch(&target)?;
                Ok(importer.import_batch(deals))
            }).await??;

            info!("Imported batch in: {:?}", timer.elapsed());

            storage.write_csv(&store_path)?;
            write_json_to_stdout(&outcome)?;
        }
        "create" => {
            let creator = DealCreator::new(storage.clone(), validator);
            let request = ingest::read_deal(&target)?;

            match creator.create(request) {
                Ok(deal) => {
                    storage.write_csv(&store_path)?;
                    write_json_to_stdout(&deal)?;
                }
                Err(error) => {
                    eprintln!("{error}");
                    exit(1);
                }
            }
        }
        "show" => {
            let creator = DealCreator::new(storage, validator);

            match creator.find(&target) {
                Ok(deal) => write_json_to_stdout(&deal)?,
                Err(error) => {
                    eprintln!("{error}");
                    exit(1);
                }
            }
        }
        _ => {
            eprintln!("Unknown command '{command}'\n{USAGE}");
            exit(1);
        }
    }

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the JSON report, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_json_to_stdout<T: Serialize>(value: &T) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, value)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}
