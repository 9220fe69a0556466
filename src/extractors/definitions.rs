//! Label/value pairs from definition lists.
//!
//! Every `<dl>` on the page is read as a group. Within a group the i-th `<dt>`
//! is paired with the i-th `<dd>`; when the counts differ the extra elements
//! of the longer list are ignored. Pairs with an empty label or value are
//! dropped, and a label seen again later overwrites the earlier value.

use crate::document::{DocumentView, Locator};
use crate::models::AdditionalInfo;
use tracing::{debug, info, instrument};

/// Locators describing a label/value group.
#[derive(Debug, Clone, Copy)]
pub struct GroupLocators<'a> {
    pub group: &'a Locator,
    pub label: &'a Locator,
    pub value: &'a Locator,
}

/// Collect every label/value pair on the page.
///
/// An empty mapping is a valid result; a locator that cannot be evaluated
/// yields whatever was collected before it failed.
#[instrument(level = "debug", skip_all)]
pub fn extract_definitions<D: DocumentView>(view: &D, locators: GroupLocators<'_>) -> AdditionalInfo {
    let mut info = AdditionalInfo::new();

    let groups = match view.query_all(locators.group) {
        Ok(groups) => groups,
        Err(e) => {
            debug!(error = %e, "Group locator failed");
            return info;
        }
    };

    for (index, group) in groups.into_iter().enumerate() {
        let (labels, values) = match (
            view.query_within(group, locators.label),
            view.query_within(group, locators.value),
        ) {
            (Ok(labels), Ok(values)) => (labels, values),
            (Err(e), _) | (_, Err(e)) => {
                debug!(group = index, error = %e, "Group member locator failed");
                continue;
            }
        };
        if labels.len() != values.len() {
            debug!(
                group = index,
                labels = labels.len(),
                values = values.len(),
                "Label/value counts differ; pairing the shorter list"
            );
        }

        for (label, value) in labels.into_iter().zip(values) {
            let key = view.text(label).trim().to_string();
            let value = view.text(value).trim().to_string();
            if key.is_empty() || value.is_empty() {
                continue;
            }
            debug!(%key, %value, "Field extracted");
            info.insert(key, value);
        }
    }

    info!(fields = info.len(), "Definition list fields extracted");
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorConfig;
    use crate::document::HtmlDocument;

    fn definitions_of(html: &str) -> AdditionalInfo {
        let doc = HtmlDocument::parse(html);
        let config = ExtractorConfig::default();
        extract_definitions(
            &doc,
            GroupLocators {
                group: &config.group_locator,
                label: &config.label_locator,
                value: &config.value_locator,
            },
        )
    }

    #[test]
    fn test_pairs_in_document_order() {
        let info = definitions_of(
            "<dl><dt>Department</dt><dd>Engineering</dd><dt>Type</dt><dd>Full-Time</dd></dl>",
        );
        let pairs: Vec<_> = info.iter().collect();
        assert_eq!(pairs, vec![("Department", "Engineering"), ("Type", "Full-Time")]);
    }

    #[test]
    fn test_mismatched_counts_truncate() {
        let info = definitions_of(
            "<dl><dt>A</dt><dt>B</dt><dt>C</dt><dd>1</dd><dd>2</dd></dl>",
        );
        let pairs: Vec<_> = info.iter().collect();
        assert_eq!(pairs, vec![("A", "1"), ("B", "2")]);
    }

    #[test]
    fn test_later_group_overwrites_label() {
        let info = definitions_of(
            "<dl><dt>Category</dt><dd>Engineering</dd><dt>ID</dt><dd>5417</dd></dl>\
             <dl><dt>Category</dt><dd>Data</dd></dl>",
        );
        assert_eq!(info.len(), 2);
        assert_eq!(info.get("Category"), Some("Data"));
        assert_eq!(info.iter().next(), Some(("Category", "Data")));
    }

    #[test]
    fn test_empty_label_or_value_dropped() {
        let info = definitions_of(
            "<dl><dt> </dt><dd>orphan</dd><dt>Empty</dt><dd>  </dd><dt>Kept</dt><dd>yes</dd></dl>",
        );
        let pairs: Vec<_> = info.iter().collect();
        assert_eq!(pairs, vec![("Kept", "yes")]);
    }

    #[test]
    fn test_no_groups_is_empty() {
        assert!(definitions_of("<p>nothing</p>").is_empty());
    }

    #[test]
    fn test_invalid_group_locator_is_empty() {
        let doc = HtmlDocument::parse("<dl><dt>A</dt><dd>1</dd></dl>");
        let bad = Locator::css("dl[[");
        let label = Locator::tag("dt");
        let value = Locator::tag("dd");
        let info = extract_definitions(
            &doc,
            GroupLocators {
                group: &bad,
                label: &label,
                value: &value,
            },
        );
        assert!(info.is_empty());
    }
}
