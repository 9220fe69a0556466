//! Job description extraction.
//!
//! Uses the same ordered fallback as the title, but every element a locator
//! resolves to is inspected and only text longer than the configured minimum
//! is accepted. Short matches are usually labels or decorative containers
//! sharing the description's CSS classes.

use super::lookup::{Scan, first_accepted};
use crate::document::{DocumentView, Locator};
use crate::utils::truncate_for_log;
use tracing::{info, instrument};

/// `true` when `text` is long enough to be a real description.
pub fn is_substantial(text: &str, min_chars: usize) -> bool {
    text.chars().count() > min_chars
}

/// Extract the job description, or `None` when no locator yields a
/// qualifying element.
#[instrument(level = "debug", skip_all, fields(locators = locators.len(), min_chars = min_chars))]
pub fn extract_description<D: DocumentView>(
    view: &D,
    locators: &[Locator],
    min_chars: usize,
) -> Option<String> {
    let description = first_accepted(view, "description", locators, Scan::All, |text| {
        is_substantial(text, min_chars)
    });
    match &description {
        Some(text) => info!(
            chars = text.chars().count(),
            preview = %truncate_for_log(text, 80),
            "Description found"
        ),
        None => info!("Description not found"),
    }
    description
}
