//! Command-line interface definitions.
//!
//! All options have defaults, so running the binary with no arguments scrapes
//! the sample iCIMS posting and writes `job_posting.json`.

use clap::Parser;

/// Sample iCIMS posting used when no URL is given.
pub const DEFAULT_JOB_URL: &str = "https://careers-aeieng.icims.com/jobs/5417/engineering-data-analyst/job?mobile=false&width=1920&height=500&bga=true&needsRedirect=false&jan1offset=330&jun1offset=330";

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Extract a structured record from one iCIMS job posting.
///
/// # Examples
///
/// ```sh
/// # Scrape a posting and write job_posting.json
/// job_posting_scraper https://careers-example.icims.com/jobs/1234/analyst/job
///
/// # Re-run extraction against a frame document saved from a browser
/// job_posting_scraper --html-file frame.html -o out/job.json https://careers-example.icims.com/jobs/1234/analyst/job
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Job posting URL
    #[arg(default_value = DEFAULT_JOB_URL)]
    pub url: String,

    /// Output path for the JSON record
    #[arg(short, long, default_value = "job_posting.json")]
    pub output: String,

    /// Read the job content document from this file instead of fetching it
    #[arg(long)]
    pub html_file: Option<String>,

    /// Optional path to an extractor config YAML file
    #[arg(short, long, env = "JOB_SCRAPER_CONFIG")]
    pub config: Option<String>,

    /// CSS selector of the iframe holding the job content
    #[arg(long, default_value = "#icims_content_iframe")]
    pub iframe_selector: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,

    /// User-Agent header sent with requests
    #[arg(long, env = "JOB_SCRAPER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log every extraction step (overridden by RUST_LOG)
    #[arg(long)]
    pub debug: bool,

    /// Print the summary without writing the JSON file
    #[arg(long)]
    pub no_save: bool,
}
