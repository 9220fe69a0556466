//! # Job Posting Scraper
//!
//! Extracts a structured job-posting record from an iCIMS career portal page,
//! where the job content lives inside an embedded iframe.
//!
//! ## Usage
//!
//! ```sh
//! job_posting_scraper https://careers-example.icims.com/jobs/1234/analyst/job -o job.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Loading**: fetch the posting and its content iframe (or read a saved file)
//! 2. **Extraction**: run the field extractors against the frame document
//! 3. **Merging**: fill gaps from embedded JSON-LD, never overriding visible text
//! 4. **Output**: print a summary and write the JSON record

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod assembler;
mod cli;
mod config;
mod document;
mod extractors;
mod fetch;
mod models;
mod outputs;
mod utils;

use assembler::JobExtractor;
use cli::Cli;
use config::{ExtractorConfig, load_config};
use fetch::FetchOptions;
use outputs::{console, json};

#[tokio::main]
#[instrument(skip_all)]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    // --- Tracing init ---
    let default_level = if args.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!(url = %args.url, "job_posting_scraper starting up");
    debug!(?args, "Parsed CLI arguments");

    let config = match &args.config {
        Some(path) => load_config(path).await?,
        None => ExtractorConfig::default(),
    };

    // ---- Load the job content document ----
    let document = match &args.html_file {
        Some(path) => fetch::load_document_file(path).await?,
        None => {
            let options = FetchOptions {
                iframe_selector: args.iframe_selector.clone(),
                timeout: Duration::from_secs(args.timeout_secs),
                user_agent: args.user_agent.clone(),
            };
            fetch::load_job_document(&args.url, &options).await?
        }
    };

    // ---- Extract ----
    let extractor = JobExtractor::new(config);
    let record = match extractor.extract(&document, document.raw_markup(), &args.url) {
        Ok(record) => record,
        Err(e) => {
            error!(error = %e, "Extraction failed; no record produced");
            return Err(e.into());
        }
    };

    println!("{}", console::render_summary(&record));

    // ---- Output ----
    if args.no_save {
        info!("Skipping JSON output");
    } else if let Err(e) = json::write_record(&record, &args.output).await {
        error!(path = %args.output, error = %e, "Failed to write JSON record");
        return Err(e);
    } else {
        info!(path = %args.output, "Saved job record");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
