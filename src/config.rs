//! Extraction settings.
//!
//! [`ExtractorConfig::default`] encodes the iCIMS career-portal layout. A YAML
//! file can override any subset of the settings; omitted keys keep their
//! defaults.
//!
//! ```yaml
//! min_description_chars: 80
//! title_locators:
//!   - { by: css, value: "h1.job-title" }
//!   - { by: tag_name, value: "h1" }
//! ```

use crate::document::Locator;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

/// Locator lists and thresholds used by the field extractors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Title candidates, most specific first. Only the first element each
    /// locator resolves to is considered.
    pub title_locators: Vec<Locator>,
    /// Description candidates, most specific first. Every element a locator
    /// resolves to is considered.
    pub description_locators: Vec<Locator>,
    /// A description must be strictly longer than this many characters.
    pub min_description_chars: usize,
    /// Value elements scanned for something that looks like a location.
    pub location_locator: Locator,
    /// Case-insensitive keyword that marks a value as a location.
    pub location_keyword: String,
    /// Label/value group containers.
    pub group_locator: Locator,
    /// Label elements within a group.
    pub label_locator: Locator,
    /// Value elements within a group.
    pub value_locator: Locator,
    /// URL path segment that precedes the job id.
    pub job_id_marker: String,
    /// Capture the whole page text as a fallback field.
    pub capture_full_text: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            title_locators: vec![
                Locator::css("h1.iCIMS_JobsTable h2"),
                Locator::css(".iCIMS_Header"),
                Locator::css("h1"),
                Locator::css("h2.iCIMS_InfoMsg_Job"),
                Locator::css(r#"div[class="iCIMS_JobsTable"] h2"#),
            ],
            description_locators: vec![
                Locator::css(".iCIMS_InfoMsg.iCIMS_InfoField_Job"),
                Locator::css(".iCIMS_JobContent"),
                Locator::css("div[class*='JobDescription']"),
                Locator::css("div.iCIMS_Expandable_Container"),
            ],
            min_description_chars: 100,
            location_locator: Locator::css("dd"),
            location_keyword: "remote".to_string(),
            group_locator: Locator::tag("dl"),
            label_locator: Locator::tag("dt"),
            value_locator: Locator::tag("dd"),
            job_id_marker: "jobs".to_string(),
            capture_full_text: true,
        }
    }
}

/// Load an [`ExtractorConfig`] from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid YAML for
/// this structure.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_config(path: impl AsRef<Path>) -> Result<ExtractorConfig, Box<dyn Error>> {
    let text = tokio::fs::read_to_string(path.as_ref()).await?;
    let config = parse_config(&text)?;
    info!(
        title_locators = config.title_locators.len(),
        description_locators = config.description_locators.len(),
        "Loaded extractor configuration"
    );
    Ok(config)
}

fn parse_config(text: &str) -> Result<ExtractorConfig, serde_yaml::Error> {
    if text.trim().is_empty() {
        return Ok(ExtractorConfig::default());
    }
    serde_yaml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SelectBy;

    #[test]
    fn test_defaults_match_icims_layout() {
        let config = ExtractorConfig::default();
        assert_eq!(config.title_locators.len(), 5);
        assert_eq!(config.title_locators[2], Locator::css("h1"));
        assert_eq!(config.description_locators.len(), 4);
        assert_eq!(config.min_description_chars, 100);
        assert_eq!(config.job_id_marker, "jobs");
        assert!(config.capture_full_text);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = parse_config("min_description_chars: 80\nlocation_keyword: hybrid\n").unwrap();
        assert_eq!(config.min_description_chars, 80);
        assert_eq!(config.location_keyword, "hybrid");
        assert_eq!(config.title_locators, ExtractorConfig::default().title_locators);
    }

    #[test]
    fn test_yaml_locator_list_override() {
        let yaml = r#"
title_locators:
  - { by: css, value: "h1.job-title" }
  - { by: tag_name, value: "h1" }
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.title_locators.len(), 2);
        assert_eq!(config.title_locators[1].by, SelectBy::TagName);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse_config("  \n").unwrap(), ExtractorConfig::default());
    }

    #[tokio::test]
    async fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extractor.yaml");
        tokio::fs::write(&path, "capture_full_text: false\n").await.unwrap();
        let config = load_config(&path).await.unwrap();
        assert!(!config.capture_full_text);
    }

    #[tokio::test]
    async fn test_load_config_rejects_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extractor.yaml");
        tokio::fs::write(&path, "min_description_chars: [not, a, number]\n")
            .await
            .unwrap();
        assert!(load_config(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(dir.path().join("absent.yaml")).await.is_err());
    }
}
