//! Site-specific extraction strategies.
//!
//! A strategy is a plain `(detect, extract)` pair over a [`Page`]. The
//! selector walks [`STRATEGIES`] in order and falls back to [`GENERIC`],
//! so detection order lives here as data:
//!
//! 1. Gmail
//! 2. Outlook (before SharePoint: `outlook.office.com` contains `office.com`)
//! 3. Google Docs
//! 4. SharePoint / Office
//!
//! Strategies return `Result`; [`Strategy::extract`] turns every error into
//! a `success: false` result and applies the caller's options.

use url::Url;

use crate::error::Result;
use crate::options::ExtractionOptions;
use crate::page::Page;
use crate::result::{EmailProvider, ExtractionMetadata, ExtractionResult, SiteType};
use crate::text;

pub mod gdocs;
pub mod generic;
pub mod gmail;
pub mod outlook;
pub mod sharepoint;

/// Title used when the page has none.
pub const UNTITLED: &str = "Untitled Page";

/// Site-specific strategies in detection order.
pub static STRATEGIES: [Strategy; 4] = [
    gmail::STRATEGY,
    outlook::STRATEGY,
    gdocs::STRATEGY,
    sharepoint::STRATEGY,
];

/// Fallback strategy; detects every page.
pub static GENERIC: Strategy = generic::STRATEGY;

/// One site family's `(detect, extract)` pair.
#[derive(Clone, Copy)]
pub struct Strategy {
    site_type: SiteType,
    name: &'static str,
    detect: fn(&Url) -> bool,
    run: fn(&dyn Page, &ExtractionOptions) -> Result<ExtractionResult>,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("site_type", &self.site_type)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Strategy {
    #[must_use]
    pub const fn site_type(&self) -> SiteType {
        self.site_type
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this strategy handles the page at `url`. Pure.
    #[must_use]
    pub fn detect(&self, url: &Url) -> bool {
        (self.detect)(url)
    }

    /// Run the strategy. Never fails: errors become `success: false`.
    pub fn extract(&self, page: &dyn Page, options: &ExtractionOptions) -> ExtractionResult {
        match (self.run)(page, options) {
            Ok(result) => apply_options(result, page, options),
            Err(err) => {
                tracing::warn!(strategy = self.name, error = %err, "extraction failed");
                error_result(page, self.site_type, &err.to_string())
            }
        }
    }
}

/// Successful result around already-normalized `content`.
///
/// The title is the page title, or [`UNTITLED`].
pub fn base_result(page: &dyn Page, content: String, metadata: ExtractionMetadata) -> ExtractionResult {
    let title = page.title();
    ExtractionResult {
        success: true,
        title: if title.is_empty() { UNTITLED.to_string() } else { title },
        url: page.url().to_string(),
        hostname: page.hostname().to_string(),
        content,
        selected_text: None,
        error: None,
        metadata,
    }
}

/// Failed result: empty content, `extractionMethod = "error"`.
pub fn error_result(page: &dyn Page, site_type: SiteType, error: &str) -> ExtractionResult {
    failed_result(
        page.title(),
        page.url().to_string(),
        page.hostname().to_string(),
        site_type,
        error,
    )
}

/// [`error_result`] from page fields the caller has already read.
pub(crate) fn failed_result(
    title: String,
    url: String,
    hostname: String,
    site_type: SiteType,
    error: &str,
) -> ExtractionResult {
    ExtractionResult {
        success: false,
        title: if title.is_empty() { "Error".to_string() } else { title },
        url,
        hostname,
        content: String::new(),
        selected_text: None,
        error: Some(error.to_string()),
        metadata: ExtractionMetadata::new(site_type, "error"),
    }
}

/// Attach the selection and enforce the length cap.
///
/// Consumes `result` and returns the adjusted value. When the content is
/// longer than the cap, `originalLength` and `truncated` are recorded.
#[must_use]
pub fn apply_options(
    result: ExtractionResult,
    page: &dyn Page,
    options: &ExtractionOptions,
) -> ExtractionResult {
    let selected_text = if options.include_selected {
        Some(text::selected_text(page))
    } else {
        result.selected_text
    };

    let original_length = text::char_len(&result.content);
    match options.effective_cap() {
        Some(cap) if original_length > cap => {
            let content = text::truncate(&result.content, cap);
            let metadata = ExtractionMetadata {
                original_length: Some(original_length),
                truncated: Some(true),
                ..result.metadata
            };
            ExtractionResult {
                content,
                selected_text,
                metadata,
                ..result
            }
        }
        _ => ExtractionResult {
            selected_text,
            ..result
        },
    }
}

/// `Subject: ..\n\nFrom: ..\n\n<body>` with empty sections left out.
///
/// `None` when both subject and body are empty.
pub(crate) fn compose_email(subject: &str, sender: &str, body: &str) -> Option<String> {
    if subject.is_empty() && body.is_empty() {
        return None;
    }
    let mut sections = Vec::with_capacity(3);
    if !subject.is_empty() {
        sections.push(format!("Subject: {subject}"));
    }
    if !sender.is_empty() {
        sections.push(format!("From: {sender}"));
    }
    if !body.is_empty() {
        sections.push(body.to_string());
    }
    Some(sections.join("\n\n"))
}

pub(crate) fn email_metadata(
    site_type: SiteType,
    provider: EmailProvider,
    method: &str,
) -> ExtractionMetadata {
    ExtractionMetadata {
        is_email: Some(true),
        is_gmail: Some(provider == EmailProvider::Gmail),
        is_outlook: Some(provider == EmailProvider::Outlook),
        email_provider: Some(provider),
        ..ExtractionMetadata::new(site_type, method)
    }
}

/// The host of `url`, or `""`.
#[inline]
pub(crate) fn host(url: &Url) -> &str {
    url.host_str().unwrap_or_default()
}

/// First non-empty value among `names`, in priority order.
pub(crate) fn query_param(url: &Url, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        url.query_pairs()
            .find(|(key, _)| key == *name)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    })
}
