//! Data models for scraped job postings.
//!
//! This module defines the records produced by one extraction run:
//! - [`JobRecord`]: the canonical, flat record written to JSON
//! - [`AdditionalInfo`]: ordered label/value pairs read from definition lists
//! - [`StructuredJob`]: the partial record recovered from JSON-LD markup
//!
//! Every scalar field is an `Option<String>`. Absent values serialize as
//! `null` so the output always carries the full key set.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered string-to-string mapping for definition-list fields.
///
/// Entries keep the position of their first insertion. Inserting a label that
/// is already present replaces its value in place (last value wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionalInfo {
    entries: Vec<(String, String)>,
}

impl AdditionalInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair, overwriting the value of an existing label.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == label) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((label, value)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for AdditionalInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// The canonical job-posting record.
///
/// Field order matches the JSON output order. `full_page_text` is a
/// diagnostic fallback and is omitted from the output when it was not
/// captured.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct JobRecord {
    /// The job posting URL as given by the caller.
    pub url: String,
    /// Local time of the extraction run, ISO-8601 / RFC 3339.
    pub scrape_timestamp: String,
    /// Path segment following the `/jobs/` marker in the URL.
    pub job_id: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub posted_date: Option<String>,
    pub employment_type: Option<String>,
    /// Label/value pairs from the page's definition lists, in document order.
    pub additional_info: AdditionalInfo,
    pub salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_page_text: Option<String>,
}

impl JobRecord {
    /// Create a record with every extracted field absent.
    pub fn new(url: impl Into<String>, scrape_timestamp: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            scrape_timestamp: scrape_timestamp.into(),
            ..Self::default()
        }
    }

    /// Fill gaps in this record from JSON-LD data.
    ///
    /// A field is only written when it is currently absent or empty and the
    /// structured value is non-empty. Values found in the visible DOM are
    /// never replaced. Returns the number of fields filled.
    pub fn merge_structured(&mut self, structured: StructuredJob) -> usize {
        let StructuredJob {
            title,
            company,
            description,
            posted_date,
            employment_type,
            location,
            salary,
        } = structured;

        [
            fill_gap(&mut self.job_title, title),
            fill_gap(&mut self.company, company),
            fill_gap(&mut self.description, description),
            fill_gap(&mut self.posted_date, posted_date),
            fill_gap(&mut self.employment_type, employment_type),
            fill_gap(&mut self.location, location),
            fill_gap(&mut self.salary, salary),
        ]
        .into_iter()
        .filter(|filled| *filled)
        .count()
    }
}

fn fill_gap(slot: &mut Option<String>, value: Option<String>) -> bool {
    let missing = slot.as_deref().is_none_or(str::is_empty);
    match value {
        Some(value) if missing && !value.is_empty() => {
            *slot = Some(value);
            true
        }
        _ => false,
    }
}

/// Partial job record recovered from a `JobPosting` JSON-LD block.
///
/// `title` corresponds to [`JobRecord::job_title`]; every other field shares
/// its name with the canonical record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredJob {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub posted_date: Option<String>,
    pub employment_type: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
}

impl StructuredJob {
    /// `true` when no field carries a value.
    pub fn is_empty(&self) -> bool {
        [
            &self.title,
            &self.company,
            &self.description,
            &self.posted_date,
            &self.employment_type,
            &self.location,
            &self.salary,
        ]
        .iter()
        .all(|field| field.is_none())
    }
}
