//! Field extractors for iCIMS job postings.
//!
//! Each extractor reads one part of the record and reports a miss as `None`
//! (or an empty mapping) rather than an error:
//!
//! | Field | Module | Source |
//! |-------|--------|--------|
//! | `job_title` | [`title`] | ordered heading locators |
//! | `location` | [`location`] | first `<dd>` that looks like a place |
//! | `additional_info` | [`definitions`] | `<dl>` label/value pairs |
//! | `description` | [`description`] | ordered container locators, length-gated |
//! | several | [`structured`] | JSON-LD `JobPosting` markup |
//!
//! [`lookup`] holds the fallback machinery shared by the locator-driven
//! extractors.

pub mod definitions;
pub mod description;
pub mod location;
pub mod lookup;
pub mod structured;
pub mod title;
