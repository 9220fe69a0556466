//! JSON-LD `JobPosting` extraction.
//!
//! Career pages usually embed schema.org markup in
//! `<script type="application/ld+json">` blocks. Blocks are tried in document
//! order; empty or malformed blocks are skipped, and the first block that
//! contains a `JobPosting` object is the only one read.
//!
//! Values are taken as-is: descriptions may still contain HTML and salary
//! objects are kept as their JSON text without unit normalization.

use crate::models::StructuredJob;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, info, instrument};

static JSONLD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("static selector")
});

const JOB_POSTING_TYPE: &str = "JobPosting";

/// Extract a partial job record from the JSON-LD blocks in `markup`.
///
/// Returns an empty [`StructuredJob`] when no block describes a job posting.
#[instrument(level = "debug", skip_all, fields(bytes = markup.len()))]
pub fn extract_structured(markup: &str) -> StructuredJob {
    let document = Html::parse_document(markup);

    for (block, script) in document.select(&JSONLD_SELECTOR).enumerate() {
        let text = script.text().collect::<String>();
        let text = text.trim();
        if text.is_empty() {
            debug!(block, "Skipping empty JSON-LD block");
            continue;
        }

        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                debug!(block, error = %e, "Skipping malformed JSON-LD block");
                continue;
            }
        };

        if let Some(posting) = find_job_posting(&value) {
            let job = parse_job_posting(posting);
            info!(block, "JSON-LD JobPosting extracted");
            return job;
        }
        debug!(block, "JSON-LD block is not a JobPosting");
    }

    debug!("No JobPosting JSON-LD block found");
    StructuredJob::default()
}

fn find_job_posting(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.iter().find_map(find_job_posting),
        Value::Object(map) => {
            if is_job_posting(value) {
                Some(value)
            } else {
                map.get("@graph").and_then(find_job_posting)
            }
        }
        _ => None,
    }
}

fn is_job_posting(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(ld_type)) => ld_type == JOB_POSTING_TYPE,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(JOB_POSTING_TYPE)),
        _ => false,
    }
}

fn parse_job_posting(v: &Value) -> StructuredJob {
    StructuredJob {
        title: v.get("title").and_then(text_of),
        company: v.get("hiringOrganization").and_then(|org| match org {
            Value::Object(_) => org.get("name").and_then(text_of),
            other => text_of(other),
        }),
        description: v.get("description").and_then(text_of),
        posted_date: v.get("datePosted").and_then(text_of),
        employment_type: v.get("employmentType").and_then(text_of),
        location: v.get("jobLocation").and_then(compose_location),
        salary: v.get("baseSalary").and_then(salary_text),
    }
}

/// Scalar text of a JSON value. Arrays of scalars are joined with `", "`.
fn text_of(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(text_of)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// `"{city}, {region}"` from `jobLocation.address`, with stray separators
/// trimmed when either part is missing.
fn compose_location(job_location: &Value) -> Option<String> {
    let place = match job_location {
        Value::Array(places) => places.first()?,
        other => other,
    };
    let address = place.get("address")?;
    let city = address.get("addressLocality").and_then(text_of).unwrap_or_default();
    let region = address.get("addressRegion").and_then(text_of).unwrap_or_default();

    let composed = format!("{city}, {region}");
    let trimmed = composed.trim_matches(|c: char| c == ',' || c == ' ');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn salary_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => (!s.is_empty()).then(|| s.clone()),
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        other => Some(other.to_string()),
    }
}
