//! # page-context
//!
//! Site-aware extraction of the page a user is looking at, for use as
//! context by an AI assistant side panel.
//!
//! The page kind (webmail, document editor, enterprise portal, anything
//! else) is detected from its address, a matching strategy reads the DOM,
//! and the outcome is normalized into a single [`ExtractionResult`].
//!
//! ## Quick Start
//!
//! ```rust
//! use page_context::{extract_html, ExtractionOptions, SiteType};
//!
//! let html = r#"<html><head><title>Release notes</title></head>
//! <body><main>Version 2 ships a faster parser, a new settings page and a
//! long list of fixes collected over the last quarter of work.</main></body></html>"#;
//!
//! let result = extract_html(html, "https://example.com/notes", &ExtractionOptions::default())?;
//! assert!(result.success);
//! assert_eq!(result.metadata.site_type, SiteType::Generic);
//! println!("{}: {}", result.title, result.content);
//! # Ok::<(), page_context::Error>(())
//! ```
//!
//! ## Contract
//!
//! - [`extract`] never panics and never returns an error; `success: false`
//!   is the only failure signal.
//! - Document editors and portal document viewers return partial content
//!   plus a hand-off flag (`needsExport`, `needsApiExtraction`); fetching
//!   the real document is left to a network-capable caller.
//! - The crate performs no I/O and keeps no state between calls.

mod error;
mod extract;
mod options;
mod result;

/// Page accessor capability and the `dom_query`-backed implementation.
pub mod page;

/// Prioritized selector helpers.
pub mod query;

/// Text normalization (whitespace cleanup, sentence-aware truncation).
pub mod text;

/// Site-specific strategies and shared result builders.
pub mod strategy;

/// Reduced extraction for hosts injecting a single function.
pub mod fallback;

/// JSON message envelope used by the transport.
pub mod message;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::{extract, select_strategy};
pub use options::{ExtractionOptions, Thresholds};
pub use page::{Element, HtmlPage, Page};
pub use result::{EmailProvider, ExtractionMetadata, ExtractionResult, SiteType};

/// Parses `html` as the page shown at `url` and extracts it.
///
/// The only error is an unparseable `url`; extraction failures are
/// reported inside the result.
///
/// # Example
///
/// ```rust
/// use page_context::{extract_html, ExtractionOptions};
///
/// let html = r#"<title>x - Google Docs</title><div class="kix-page">Draft</div>"#;
/// let result = extract_html(html, "https://docs.google.com/document/d/abc123/edit", &ExtractionOptions::default())?;
/// assert_eq!(result.metadata.needs_export, Some(true));
/// assert_eq!(result.metadata.doc_id.as_deref(), Some("abc123"));
/// # Ok::<(), page_context::Error>(())
/// ```
pub fn extract_html(html: &str, url: &str, options: &ExtractionOptions) -> Result<ExtractionResult> {
    let page = HtmlPage::new(html, url)?;
    Ok(extract(&page, options))
}

/// Like [`extract_html`], for raw bytes in a `<meta>`-declared charset.
pub fn extract_bytes(html: &[u8], url: &str, options: &ExtractionOptions) -> Result<ExtractionResult> {
    let page = HtmlPage::from_bytes(html, url)?;
    Ok(extract(&page, options))
}
