//! Job location extraction.
//!
//! iCIMS pages have no dedicated location markup, so the location is the
//! first definition value whose text looks like a place: it contains a comma
//! ("Austin, TX") or the remote keyword ("Remote - US"). Candidates are not
//! scored; document order decides.

use crate::document::{DocumentView, Locator};
use tracing::{debug, info, instrument};

/// `true` when `text` reads like a location.
pub fn looks_like_location(text: &str, keyword: &str) -> bool {
    if text.contains(',') {
        return true;
    }
    !keyword.is_empty() && text.to_lowercase().contains(&keyword.to_lowercase())
}

/// Extract the job location from generic value elements.
#[instrument(level = "debug", skip_all, fields(%locator))]
pub fn extract_location<D: DocumentView>(
    view: &D,
    locator: &Locator,
    keyword: &str,
) -> Option<String> {
    let elements = match view.query_all(locator) {
        Ok(elements) => elements,
        Err(e) => {
            debug!(error = %e, "Location locator failed");
            return None;
        }
    };

    let location = elements
        .into_iter()
        .map(|element| view.text(element).trim().to_string())
        .find(|text| looks_like_location(text, keyword));

    match &location {
        Some(location) => info!(%location, "Location found"),
        None => debug!("Location not found"),
    }
    location
}
