//! Page accessor capability.
//!
//! Strategies never touch a browser directly. They read the page through
//! [`Page`], which exposes the address, the title, CSS queries and the
//! current selection. [`HtmlPage`] implements it over a `dom_query`
//! snapshot; tests and hosts can supply their own implementation.

use std::sync::LazyLock;

use dom_query::{Document, Matcher, NodeRef, Selection};
use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use url::Url;

use crate::error::{Error, Result};
use crate::text;

/// Read-only view of the page being extracted.
pub trait Page {
    /// Current address of the page.
    fn url(&self) -> &Url;

    /// `document.title`, whitespace-normalized. May be empty.
    fn title(&self) -> String;

    /// First element matching `selector`, in document order.
    fn query_selector(&self, selector: &str) -> Result<Option<Element>>;

    /// Every element matching `selector`, in document order.
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>>;

    /// The `<body>` element, if the page has one.
    fn body(&self) -> Option<Element>;

    /// The user's current text selection.
    fn selected_text(&self) -> Result<String>;

    /// Host part of the address, `""` for host-less URLs.
    fn hostname(&self) -> &str {
        self.url().host_str().unwrap_or_default()
    }
}

/// Owned snapshot of one element: tag, text content and attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    text: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            text: text.into(),
            attributes: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Raw `textContent`, whitespace untouched.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Current value of an `<input>`; `None` for other elements.
    #[must_use]
    pub fn input_value(&self) -> Option<&str> {
        if self.tag == "input" {
            self.attr("value")
        } else {
            None
        }
    }
}

/// A parsed HTML snapshot of a page at a known address.
///
/// ```rust
/// use page_context::{HtmlPage, Page};
///
/// let page = HtmlPage::new("<title> Hi </title><main>Body</main>", "https://example.com/a")?;
/// assert_eq!(page.title(), "Hi");
/// assert_eq!(page.hostname(), "example.com");
/// # Ok::<(), page_context::Error>(())
/// ```
pub struct HtmlPage {
    document: Document,
    url: Url,
    selection: Option<String>,
}

impl HtmlPage {
    /// Parse `html` as the page currently shown at `url`.
    pub fn new(html: &str, url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|err| Error::InvalidUrl(format!("{url}: {err}")))?;
        Ok(Self {
            document: Document::from(html),
            url,
            selection: None,
        })
    }

    /// Parse raw page bytes, honoring a `<meta>` charset declaration.
    pub fn from_bytes(html: &[u8], url: &str) -> Result<Self> {
        Self::new(&decode_html(html), url)
    }

    /// Attach the text the user currently has selected.
    #[must_use]
    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }

    fn matches(&self, selector: &str) -> Result<Selection<'_>> {
        let matcher =
            Matcher::new(selector).map_err(|_| Error::InvalidSelector(selector.to_string()))?;
        Ok(self.document.select_matcher(&matcher))
    }
}

impl Page for HtmlPage {
    fn url(&self) -> &Url {
        &self.url
    }

    fn title(&self) -> String {
        let title = self.document.select("title");
        match title.nodes().first() {
            Some(node) => text::clean(&Selection::from(*node).text()),
            None => String::new(),
        }
    }

    fn query_selector(&self, selector: &str) -> Result<Option<Element>> {
        let found = self.matches(selector)?;
        Ok(found.nodes().first().map(snapshot))
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>> {
        let found = self.matches(selector)?;
        Ok(found.nodes().iter().map(snapshot).collect())
    }

    fn body(&self) -> Option<Element> {
        self.document.select("body").nodes().first().map(snapshot)
    }

    fn selected_text(&self) -> Result<String> {
        Ok(self.selection.clone().unwrap_or_default())
    }
}

fn snapshot(node: &NodeRef) -> Element {
    let sel = Selection::from(*node);
    Element {
        tag: node
            .node_name()
            .map(|name| name.to_ascii_lowercase())
            .unwrap_or_default(),
        text: sel.text().to_string(),
        attributes: node
            .attrs()
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect(),
    }
}

#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("META_CHARSET regex")
});

/// Decode page bytes to UTF-8.
///
/// The charset comes from the first `<meta ... charset=...>` in the first
/// 1024 bytes (this also covers the `http-equiv` form); anything unknown
/// decodes as UTF-8. Invalid sequences become U+FFFD.
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let head = String::from_utf8_lossy(&html[..html.len().min(1024)]);
    let encoding = META_CHARSET
        .captures(&head)
        .and_then(|caps| caps.get(1))
        .and_then(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8);

    if encoding == UTF_8 {
        return String::from_utf8_lossy(html).into_owned();
    }
    let (decoded, _, _) = encoding.decode(html);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/path?q=1";

    #[test]
    fn rejects_invalid_url() {
        assert!(matches!(HtmlPage::new("<p>x</p>", "not a url"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn title_is_normalized() {
        let page = HtmlPage::new("<head><title>\n  Quarterly   report \n</title></head>", URL)
            .expect("valid page");
        assert_eq!(page.title(), "Quarterly report");
    }

    #[test]
    fn missing_title_is_empty() {
        let page = HtmlPage::new("<body>x</body>", URL).expect("valid page");
        assert_eq!(page.title(), "");
    }

    #[test]
    fn query_selector_returns_first_in_document_order() {
        let page = HtmlPage::new(
            r#"<div class="m">first</div><div class="m">second</div>"#,
            URL,
        )
        .expect("valid page");
        let first = page.query_selector(".m").expect("valid selector").expect("match");
        assert_eq!(first.text(), "first");
        assert_eq!(first.tag(), "div");
        assert_eq!(page.query_selector_all(".m").expect("valid selector").len(), 2);
    }

    #[test]
    fn invalid_selector_is_an_error_not_a_panic() {
        let page = HtmlPage::new("<p>x</p>", URL).expect("valid page");
        assert!(matches!(page.query_selector("p[["), Err(Error::InvalidSelector(_))));
        assert!(matches!(page.query_selector_all(":::"), Err(Error::InvalidSelector(_))));
    }

    #[test]
    fn snapshot_keeps_attributes_and_input_value() {
        let page = HtmlPage::new(
            r#"<span email="a@b.com">Ann</span><input class="t" value="Plan">"#,
            URL,
        )
        .expect("valid page");
        let span = page.query_selector("span").expect("valid").expect("match");
        assert_eq!(span.attr("email"), Some("a@b.com"));
        assert_eq!(span.input_value(), None);
        let input = page.query_selector("input.t").expect("valid").expect("match");
        assert_eq!(input.input_value(), Some("Plan"));
    }

    #[test]
    fn selection_defaults_to_empty() {
        let page = HtmlPage::new("<p>x</p>", URL).expect("valid page");
        assert_eq!(page.selected_text().expect("readable"), "");
        let page = page.with_selection(" picked ");
        assert_eq!(page.selected_text().expect("readable"), " picked ");
    }

    #[test]
    fn hostname_is_derived_from_url() {
        let page = HtmlPage::new("", "https://mail.google.com/mail/u/0/").expect("valid page");
        assert_eq!(page.hostname(), "mail.google.com");
    }

    #[test]
    fn decodes_declared_legacy_charset() {
        let html = b"<html><head><meta charset=\"windows-1252\"></head><body>Caf\xE9</body></html>";
        assert!(decode_html(html).contains("Café"));
        let html = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=ISO-8859-1\">Caf\xE9";
        assert!(decode_html(html).contains("Café"));
    }

    #[test]
    fn undeclared_bytes_decode_lossily_as_utf8() {
        let out = decode_html(b"<p>ok \xFF end</p>");
        assert!(out.contains("ok"));
        assert!(out.contains('\u{FFFD}'));
    }
}
