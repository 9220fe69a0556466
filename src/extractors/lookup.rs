//! Ordered-fallback lookup shared by the field extractors.
//!
//! Each locator attempt produces a [`Lookup`]. A chain of locators is a plain
//! iteration that stops at the first [`Lookup::Found`]; every kind of miss
//! simply moves on to the next locator.

use crate::document::{DocumentView, Locator};
use tracing::debug;

/// Why a single locator attempt did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Miss {
    /// Nothing in the document matched.
    NoMatch,
    /// Elements matched, but none of their text passed the acceptance check.
    Unqualified { candidates: usize },
    /// The locator could not be evaluated.
    Invalid(String),
}

/// Outcome of trying one locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Trimmed text of the accepted element.
    Found(String),
    Miss(Miss),
}

/// Which matched elements a locator attempt inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// Only the first element in document order.
    First,
    /// Every element in document order, until one is accepted.
    All,
}

/// Try one locator and return the first accepted, trimmed element text.
pub fn try_locator<D, F>(view: &D, locator: &Locator, scan: Scan, accept: F) -> Lookup
where
    D: DocumentView,
    F: Fn(&str) -> bool,
{
    let elements = match view.query_all(locator) {
        Ok(elements) => elements,
        Err(e) => return Lookup::Miss(Miss::Invalid(e.to_string())),
    };
    if elements.is_empty() {
        return Lookup::Miss(Miss::NoMatch);
    }

    let limit = match scan {
        Scan::First => 1,
        Scan::All => elements.len(),
    };
    let candidates = elements.len().min(limit);

    elements
        .into_iter()
        .take(limit)
        .map(|element| view.text(element).trim().to_string())
        .find(|text| accept(text.as_str()))
        .map(Lookup::Found)
        .unwrap_or(Lookup::Miss(Miss::Unqualified { candidates }))
}

/// Try `locators` in order and return the first accepted text.
///
/// Misses are logged at debug level under `field` and never surface as
/// errors.
pub fn first_accepted<D, F>(
    view: &D,
    field: &str,
    locators: &[Locator],
    scan: Scan,
    accept: F,
) -> Option<String>
where
    D: DocumentView,
    F: Fn(&str) -> bool,
{
    locators.iter().find_map(|locator| {
        match try_locator(view, locator, scan, &accept) {
            Lookup::Found(text) => Some(text),
            Lookup::Miss(miss) => {
                debug!(field, %locator, ?miss, "Locator missed");
                None
            }
        }
    })
}
