//! Job title extraction.
//!
//! The title is the first non-empty text among the configured title
//! locators, from the iCIMS-specific header markup down to a plain `h1`.
//! Only the first element each locator resolves to is inspected.

use super::lookup::{Scan, first_accepted};
use crate::document::{DocumentView, Locator};
use tracing::{info, instrument};

/// Extract the job title, or `None` when every locator misses.
#[instrument(level = "debug", skip_all, fields(locators = locators.len()))]
pub fn extract_title<D: DocumentView>(view: &D, locators: &[Locator]) -> Option<String> {
    let title = first_accepted(view, "job_title", locators, Scan::First, |text| {
        !text.is_empty()
    });
    match &title {
        Some(title) => info!(%title, "Job title found"),
        None => info!("Job title not found"),
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use crate::document::HtmlDocument;

    fn title_of(html: &str) -> Option<String> {
        let doc = HtmlDocument::parse(html);
        extract_title(&doc, &ExtractorConfig::default().title_locators)
    }

    #[test]
    fn test_prefers_jobs_table_heading() {
        let html = r#"
            <h1 class="iCIMS_JobsTable"><div><h2>Engineering Data Analyst</h2></div></h1>
            <div class="iCIMS_Header">Careers at AEI</div>
        "#;
        assert_eq!(title_of(html).as_deref(), Some("Engineering Data Analyst"));
    }

    #[test]
    fn test_header_class_before_h1() {
        let html = r#"<h1>Generic Heading</h1><div class="iCIMS_Header"> Data Analyst </div>"#;
        assert_eq!(title_of(html).as_deref(), Some("Data Analyst"));
    }

    #[test]
    fn test_falls_back_past_empty_header() {
        let html = r#"<div class="iCIMS_Header">  </div><h1>Data Analyst</h1>"#;
        assert_eq!(title_of(html).as_deref(), Some("Data Analyst"));
    }

    #[test]
    fn test_only_first_h1_is_considered() {
        let html = r#"<h1> </h1><h1>Hidden</h1><h2 class="iCIMS_InfoMsg_Job">Info Title</h2>"#;
        assert_eq!(title_of(html).as_deref(), Some("Info Title"));
    }

    #[test]
    fn test_exact_class_jobs_table_div() {
        let html = r#"
            <div class="iCIMS_JobsTable other"><h2>Wrong</h2></div>
            <div class="iCIMS_JobsTable"><h2>Right</h2></div>
        "#;
        assert_eq!(title_of(html).as_deref(), Some("Right"));
    }

    #[test]
    fn test_not_found() {
        assert_eq!(title_of("<p>No headings here</p>"), None);
    }
}
