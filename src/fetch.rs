//! Document access: load the job content document for a posting URL.
//!
//! iCIMS career portals wrap the posting in an outer page and serve the job
//! content inside an iframe (`#icims_content_iframe`). This module fetches the
//! outer page, resolves the iframe `src` against the page URL, and fetches the
//! frame document, which is what the extractors read.
//!
//! No JavaScript is executed. Pages whose content only exists after client-side
//! rendering should be saved from a browser and loaded with
//! [`load_document_file`].

use crate::document::{HtmlDocument, Locator};
use reqwest::Client;
use scraper::Html;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// HTTP settings for [`load_job_document`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub iframe_selector: String,
    pub timeout: Duration,
    pub user_agent: String,
}

/// Build the HTTP client used for page and frame requests.
pub fn build_client(options: &FetchOptions) -> Result<Client, Box<dyn Error>> {
    let client = Client::builder()
        .timeout(options.timeout)
        .user_agent(options.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Fetch the job posting at `page_url` and return its content document.
///
/// When the page has no content iframe, the outer page itself is returned.
///
/// # Errors
///
/// Returns an error if the URL is invalid, a request fails, or the server
/// answers with a non-success status.
#[instrument(level = "info", skip_all, fields(%page_url))]
pub async fn load_job_document(
    page_url: &str,
    options: &FetchOptions,
) -> Result<HtmlDocument, Box<dyn Error>> {
    let base = Url::parse(page_url)?;
    let client = build_client(options)?;

    let outer = fetch_text(&client, base.as_str()).await?;
    let frame_url = match resolve_frame_url(&outer, &base, &options.iframe_selector)? {
        Some(url) => url,
        None => {
            warn!(
                selector = %options.iframe_selector,
                "Content iframe not found; extracting from the outer page"
            );
            return Ok(HtmlDocument::parse(outer));
        }
    };

    info!(frame_url = %frame_url, "Switching to content iframe");
    let inner = fetch_text(&client, frame_url.as_str()).await?;
    Ok(HtmlDocument::parse(inner))
}

/// Read a saved document from disk.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn load_document_file(path: impl AsRef<Path>) -> Result<HtmlDocument, Box<dyn Error>> {
    let markup = tokio::fs::read_to_string(path.as_ref()).await?;
    info!(bytes = markup.len(), "Loaded document from file");
    Ok(HtmlDocument::parse(markup))
}

async fn fetch_text(client: &Client, url: &str) -> Result<String, Box<dyn Error>> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    debug!(%url, bytes = body.len(), "Fetched document");
    Ok(body)
}

/// Absolute URL of the content iframe in `markup`, if there is one.
///
/// # Errors
///
/// Returns an error if `selector` is not a valid CSS selector.
pub fn resolve_frame_url(
    markup: &str,
    base: &Url,
    selector: &str,
) -> Result<Option<Url>, Box<dyn Error>> {
    let selector = Locator::css(selector).to_selector()?;
    let document = Html::parse_document(markup);

    let src = document
        .select(&selector)
        .filter_map(|frame| frame.value().attr("src"))
        .map(str::trim)
        .find(|src| !src.is_empty());

    match src {
        Some(src) => Ok(Some(base.join(src)?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentView;

    fn base() -> Url {
        Url::parse("https://careers-aeieng.icims.com/jobs/5417/engineering-data-analyst/job?mobile=false")
            .unwrap()
    }

    #[test]
    fn test_resolve_relative_frame_src() {
        let html = r#"<iframe id="icims_content_iframe" src="/jobs/5417/engineering-data-analyst/job?in_iframe=1"></iframe>"#;
        let url = resolve_frame_url(html, &base(), "#icims_content_iframe")
            .unwrap()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://careers-aeieng.icims.com/jobs/5417/engineering-data-analyst/job?in_iframe=1"
        );
    }

    #[test]
    fn test_resolve_absolute_frame_src() {
        let html = r#"<iframe id="icims_content_iframe" src="https://other.example.com/frame"></iframe>"#;
        let url = resolve_frame_url(html, &base(), "#icims_content_iframe")
            .unwrap()
            .unwrap();
        assert_eq!(url.as_str(), "https://other.example.com/frame");
    }

    #[test]
    fn test_missing_frame_or_src() {
        assert!(resolve_frame_url("<p>no frame</p>", &base(), "#icims_content_iframe")
            .unwrap()
            .is_none());
        assert!(resolve_frame_url(
            r#"<iframe id="icims_content_iframe"></iframe>"#,
            &base(),
            "#icims_content_iframe"
        )
        .unwrap()
        .is_none());
    }

    #[test]
    fn test_invalid_frame_selector() {
        assert!(resolve_frame_url("<p></p>", &base(), "iframe[[").is_err());
    }

    #[test]
    fn test_build_client() {
        let options = FetchOptions {
            iframe_selector: "#icims_content_iframe".to_string(),
            timeout: Duration::from_secs(15),
            user_agent: "job_posting_scraper/test".to_string(),
        };
        assert!(build_client(&options).is_ok());
    }

    #[tokio::test]
    async fn test_load_document_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.html");
        tokio::fs::write(&path, "<h1>Data Analyst</h1>").await.unwrap();

        let doc = load_document_file(&path).await.unwrap();
        let h1 = doc.query_all(&Locator::css("h1")).unwrap();
        assert_eq!(doc.text(h1[0]), "Data Analyst");
    }

    #[tokio::test]
    async fn test_load_document_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_document_file(dir.path().join("absent.html")).await.is_err());
    }
}
