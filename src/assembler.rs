//! Record assembly: run every extractor against one document and merge the
//! results into a single [`JobRecord`].
//!
//! # Pipeline
//!
//! 1. Stamp `url` and `scrape_timestamp`
//! 2. Parse `job_id` from the URL path
//! 3. Visible-DOM extractors: title, location, definition lists, description
//! 4. JSON-LD extractor over the raw markup
//! 5. Merge JSON-LD values into fields the DOM left empty
//! 6. Capture the full page text (best effort)
//!
//! Field-level misses never fail the run, and neither does a URL without a
//! job ID. Only a fault in the orchestration itself, such as an empty job
//! URL, aborts it, and then no record is produced at all.

use crate::config::ExtractorConfig;
use crate::document::{DocumentView, Locator};
use crate::extractors::definitions::{GroupLocators, extract_definitions};
use crate::extractors::description::extract_description;
use crate::extractors::location::extract_location;
use crate::extractors::structured::extract_structured;
use crate::extractors::title::extract_title;
use crate::models::JobRecord;
use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use once_cell::sync::Lazy;
use std::error::Error;
use std::fmt;
use tracing::{debug, info, instrument};
use url::Url;

/// A failure that aborts the whole extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No job URL was given, so the record would have no key.
    EmptyUrl,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "job URL is empty"),
        }
    }
}

impl Error for ExtractError {}

/// Base for resolving relative job URLs such as `/jobs/5417/analyst/job`.
static RELATIVE_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://localhost/").expect("static base URL"));

/// Runs the extraction pipeline with a fixed [`ExtractorConfig`].
#[derive(Debug, Clone, Default)]
pub struct JobExtractor {
    config: ExtractorConfig,
}

impl JobExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extract a job record, stamped with the current local time.
    ///
    /// # Arguments
    ///
    /// * `view` - The rendered job document, already inside the content frame
    /// * `raw_markup` - Source of the same document, for JSON-LD parsing
    /// * `url` - The job posting URL
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] when the run cannot proceed. No partial
    /// record is returned in that case.
    pub fn extract<D: DocumentView>(
        &self,
        view: &D,
        raw_markup: &str,
        url: &str,
    ) -> Result<JobRecord, ExtractError> {
        self.extract_at(view, raw_markup, url, Local::now().fixed_offset())
    }

    /// Same as [`JobExtractor::extract`], with an explicit timestamp.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub fn extract_at<D: DocumentView>(
        &self,
        view: &D,
        raw_markup: &str,
        url: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<JobRecord, ExtractError> {
        let config = &self.config;
        if url.trim().is_empty() {
            return Err(ExtractError::EmptyUrl);
        }
        let mut record = JobRecord::new(url, now.to_rfc3339_opts(SecondsFormat::Micros, false));

        record.job_id = parse_job_id(url, &config.job_id_marker);
        match &record.job_id {
            Some(job_id) => info!(%job_id, "Job ID parsed from URL"),
            None => debug!(marker = %config.job_id_marker, "No job ID segment in URL"),
        }

        record.job_title = extract_title(view, &config.title_locators);
        record.location = extract_location(view, &config.location_locator, &config.location_keyword);
        record.additional_info = extract_definitions(
            view,
            GroupLocators {
                group: &config.group_locator,
                label: &config.label_locator,
                value: &config.value_locator,
            },
        );
        record.description =
            extract_description(view, &config.description_locators, config.min_description_chars);

        let structured = extract_structured(raw_markup);
        if !structured.is_empty() {
            let filled = record.merge_structured(structured);
            info!(filled, "Merged JSON-LD fields into record");
        }

        if config.capture_full_text {
            record.full_page_text = capture_full_text(view);
        }

        info!(
            job_id = record.job_id.as_deref().unwrap_or("-"),
            has_title = record.job_title.is_some(),
            has_description = record.description.is_some(),
            additional_fields = record.additional_info.len(),
            "Extraction complete"
        );
        Ok(record)
    }
}

/// The path segment immediately after `marker`, e.g. `5417` in
/// `/jobs/5417/engineering-data-analyst/job`.
///
/// Relative URLs are read by their path. A URL that cannot be parsed at all
/// has no job ID.
pub fn parse_job_id(url: &str, marker: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => RELATIVE_BASE.join(url).ok()?,
        Err(e) => {
            debug!(%url, error = %e, "Job URL not parseable");
            return None;
        }
    };
    let mut segments = parsed.path_segments()?;
    segments.find(|segment| *segment == marker)?;
    segments
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

fn capture_full_text<D: DocumentView>(view: &D) -> Option<String> {
    let bodies = match view.query_all(&Locator::tag("body")) {
        Ok(bodies) => bodies,
        Err(e) => {
            debug!(error = %e, "Full page text unavailable");
            return None;
        }
    };
    let text = bodies.into_iter().next().map(|body| view.text(body))?;
    debug!(chars = text.chars().count(), "Captured full page text");
    Some(text)
}
