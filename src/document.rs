//! Queryable view over a rendered job-posting document.
//!
//! Extractors never touch `scraper` directly. They go through the
//! [`DocumentView`] trait, which exposes only the three operations the
//! pipeline needs: select elements by a [`Locator`], select within an
//! element, and read an element's visible text.
//!
//! [`HtmlDocument`] is the production implementation. It parses markup with
//! `scraper` and renders element text the way a browser reports visible text:
//! script and style content is skipped, block elements break lines, and runs
//! of horizontal whitespace collapse to a single space.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// How a locator string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectBy {
    /// A CSS selector, e.g. `div[class*='JobDescription']`.
    Css,
    /// A bare element name, e.g. `dl`.
    TagName,
}

/// One way of finding an element: a selection method and its locator string.
///
/// Locators for a field form a priority list that is tried left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    pub by: SelectBy,
    pub value: String,
}

impl Locator {
    pub fn css(value: impl Into<String>) -> Self {
        Self {
            by: SelectBy::Css,
            value: value.into(),
        }
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Self {
            by: SelectBy::TagName,
            value: value.into(),
        }
    }

    /// Compile this locator into a `scraper` selector.
    pub fn to_selector(&self) -> Result<Selector, DocumentError> {
        if self.by == SelectBy::TagName
            && (self.value.is_empty()
                || !self
                    .value
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-'))
        {
            return Err(DocumentError::InvalidLocator {
                locator: self.value.clone(),
                reason: "not an element name".to_string(),
            });
        }
        Selector::parse(&self.value).map_err(|e| DocumentError::InvalidLocator {
            locator: self.value.clone(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.by {
            SelectBy::Css => write!(f, "css:{}", self.value),
            SelectBy::TagName => write!(f, "tag:{}", self.value),
        }
    }
}

/// Errors raised by a [`DocumentView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The locator string could not be compiled into a selector.
    InvalidLocator { locator: String, reason: String },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocator { locator, reason } => {
                write!(f, "invalid locator '{locator}': {reason}")
            }
        }
    }
}

impl Error for DocumentError {}

/// Read-only access to a rendered document.
///
/// A query that matches nothing returns an empty vector, never an error.
/// Errors are reserved for locators that cannot be evaluated at all.
pub trait DocumentView {
    /// Handle to one element of the document.
    type Element<'a>: Copy
    where
        Self: 'a;

    /// All elements matching `locator`, in document order.
    fn query_all(&self, locator: &Locator) -> Result<Vec<Self::Element<'_>>, DocumentError>;

    /// Descendants of `scope` matching `locator`, in document order.
    fn query_within<'a>(
        &'a self,
        scope: Self::Element<'a>,
        locator: &Locator,
    ) -> Result<Vec<Self::Element<'a>>, DocumentError>;

    /// Visible text of `element`. Callers must not assume it is trimmed.
    fn text<'a>(&'a self, element: Self::Element<'a>) -> String;
}

/// A parsed HTML document together with its source markup.
pub struct HtmlDocument {
    markup: String,
    html: Html,
}

impl HtmlDocument {
    pub fn parse(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let html = Html::parse_document(&markup);
        Self { markup, html }
    }

    /// Full document source, for JSON-LD parsing.
    pub fn raw_markup(&self) -> &str {
        &self.markup
    }
}

impl fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlDocument")
            .field("bytes", &self.markup.len())
            .finish()
    }
}

impl DocumentView for HtmlDocument {
    type Element<'a> = ElementRef<'a>;

    fn query_all(&self, locator: &Locator) -> Result<Vec<ElementRef<'_>>, DocumentError> {
        let selector = locator.to_selector()?;
        Ok(self.html.select(&selector).collect())
    }

    fn query_within<'a>(
        &'a self,
        scope: ElementRef<'a>,
        locator: &Locator,
    ) -> Result<Vec<ElementRef<'a>>, DocumentError> {
        let selector = locator.to_selector()?;
        Ok(scope.select(&selector).collect())
    }

    fn text<'a>(&'a self, element: ElementRef<'a>) -> String {
        rendered_text(element)
    }
}

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "div", "dl", "dt", "fieldset",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "li", "main", "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

static HORIZONTAL_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\f\v\x{A0}]+").expect("static regex"));

/// Render the visible text of an element.
///
/// Lines are trimmed and blank lines dropped, so the result has no leading
/// or trailing whitespace.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    let preformatted = element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().name() == "pre");
    render_into(element, &mut raw, preformatted || element.value().name() == "pre");

    raw.lines()
        .map(|line| HORIZONTAL_WS.replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_into(element: ElementRef<'_>, out: &mut String, preformatted: bool) {
    for child in element.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            if SKIPPED_ELEMENTS.contains(&name) {
                continue;
            }
            if name == "br" {
                out.push('\n');
                continue;
            }
            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                out.push('\n');
            } else if matches!(name, "td" | "th") {
                out.push(' ');
            }
            render_into(child_el, out, preformatted || name == "pre");
            if block {
                out.push('\n');
            }
        } else if let Some(text) = child.value().as_text() {
            // Outside <pre>, newlines in text are layout, not content.
            if preformatted {
                out.push_str(text);
            } else {
                out.push_str(&text.replace('\n', " "));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_all_document_order() {
        let doc = HtmlDocument::parse("<dl><dd>one</dd><dd>two</dd></dl><dd>three</dd>");
        let found = doc.query_all(&Locator::tag("dd")).unwrap();
        let texts: Vec<String> = found.into_iter().map(|e| doc.text(e)).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_query_all_no_match_is_empty() {
        let doc = HtmlDocument::parse("<p>hello</p>");
        assert!(doc.query_all(&Locator::css(".missing")).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_css_is_error() {
        let doc = HtmlDocument::parse("<p>hello</p>");
        let err = doc.query_all(&Locator::css("div[[")).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidLocator { .. }));
    }

    #[test]
    fn test_invalid_tag_name_is_error() {
        let doc = HtmlDocument::parse("<p>hello</p>");
        let err = doc.query_all(&Locator::tag("div p")).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidLocator { .. }));
    }

    #[test]
    fn test_query_within_scopes_to_descendants() {
        let doc = HtmlDocument::parse(
            "<dl id='a'><dt>A</dt></dl><dl id='b'><dt>B1</dt><dt>B2</dt></dl>",
        );
        let groups = doc.query_all(&Locator::tag("dl")).unwrap();
        let labels = doc.query_within(groups[1], &Locator::tag("dt")).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(doc.text(labels[0]), "B1");
    }

    #[test]
    fn test_rendered_text_skips_scripts_and_breaks_blocks() {
        let doc = HtmlDocument::parse(
            "<body><div>First   line\n  continues</div><script>var x = 1;</script>\
             <p>Second<br>Third</p><span>inline</span> <b>bold</b></body>",
        );
        let body = doc.query_all(&Locator::tag("body")).unwrap();
        assert_eq!(
            doc.text(body[0]),
            "First line continues\nSecond\nThird\ninline bold"
        );
    }

    #[test]
    fn test_rendered_text_keeps_pre_line_breaks() {
        let doc = HtmlDocument::parse(
            "<body><p>wrapped\ntext</p><pre>line one\nline two</pre></body>",
        );
        let body = doc.query_all(&Locator::tag("body")).unwrap();
        assert_eq!(doc.text(body[0]), "wrapped text\nline one\nline two");

        let code = HtmlDocument::parse("<pre><code>a = 1\nb = 2</code></pre>");
        let inner = code.query_all(&Locator::css("code")).unwrap();
        assert_eq!(code.text(inner[0]), "a = 1\nb = 2");
        let pre = code.query_all(&Locator::tag("pre")).unwrap();
        assert_eq!(code.text(pre[0]), "a = 1\nb = 2");
    }

    #[test]
    fn test_rendered_text_collapses_nbsp() {
        let doc = HtmlDocument::parse("<h1>&nbsp;Data&nbsp;&nbsp;Analyst </h1>");
        let h1 = doc.query_all(&Locator::css("h1")).unwrap();
        assert_eq!(doc.text(h1[0]), "Data Analyst");
    }

    #[test]
    fn test_locator_deserializes_from_yaml() {
        let locator: Locator = serde_yaml::from_str("by: css\nvalue: h1\n").unwrap();
        assert_eq!(locator, Locator::css("h1"));
        let locator: Locator = serde_yaml::from_str("by: tag_name\nvalue: dl\n").unwrap();
        assert_eq!(locator, Locator::tag("dl"));
    }

    #[test]
    fn test_raw_markup_is_preserved() {
        let markup = "<html><body><p>x</p></body></html>";
        let doc = HtmlDocument::parse(markup);
        assert_eq!(doc.raw_markup(), markup);
    }
}
