//! Google Docs editor.
//!
//! The editing canvas renders pages lazily, so the visible text is a
//! best-effort placeholder. The authoritative content is the export of the
//! document, which a network-capable caller fetches using `docId`; every
//! successful result sets `needsExport`.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::{base_result, host, Strategy};
use crate::error::{Error, Result};
use crate::options::ExtractionOptions;
use crate::page::Page;
use crate::query;
use crate::result::{ExtractionMetadata, ExtractionResult, SiteType};
use crate::text::{char_len, clean};

pub(crate) const STRATEGY: Strategy = Strategy {
    site_type: SiteType::GoogleDocs,
    name: "gdocs",
    detect,
    run: extract,
};

/// Content while the export is pending.
pub const LOADING_PLACEHOLDER: &str = "Loading...";

const CANVAS: &[&str] = &[
    ".kix-page-content-wrapper",
    ".kix-page",
    ".kix-paginateddocumentplugin",
];

const TITLE: &[&str] = &[
    ".docs-title-input",
    ".docs-title-outer input",
    r#"[aria-label*="title"]"#,
];

const TITLE_SUFFIX: &str = " - Google Docs";

#[allow(clippy::expect_used)]
static DOC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("DOC_ID regex"));

fn detect(url: &Url) -> bool {
    host(url).contains("docs.google.com")
}

fn extract(page: &dyn Page, _options: &ExtractionOptions) -> Result<ExtractionResult> {
    let doc_id = document_id(page.url()).ok_or(Error::MissingDocumentId)?;
    let visible = visible_content(page);
    let title = document_title(page);
    tracing::debug!(doc_id = %doc_id, visible_len = char_len(&visible), "google docs export requested");

    let content = if visible.is_empty() {
        LOADING_PLACEHOLDER.to_string()
    } else {
        visible
    };
    let metadata = ExtractionMetadata {
        is_google_docs: Some(true),
        doc_id: Some(doc_id),
        needs_export: Some(true),
        ..ExtractionMetadata::new(SiteType::GoogleDocs, "gdocs-dom")
    };
    Ok(ExtractionResult {
        title,
        ..base_result(page, content, metadata)
    })
}

/// Id from `/document/d/<id>/edit`.
fn document_id(url: &Url) -> Option<String> {
    DOC_ID
        .captures(url.path())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn visible_content(page: &dyn Page) -> String {
    query::first_match(page, CANVAS)
        .map(|el| clean(el.text()))
        .unwrap_or_default()
}

/// Title input value, then its text, then the page title without suffix.
fn document_title(page: &dyn Page) -> String {
    if let Some(el) = query::first_match(page, TITLE) {
        let value = el.input_value().map(str::trim).unwrap_or_default();
        if !value.is_empty() {
            return value.to_string();
        }
        let text = clean(el.text());
        if !text.is_empty() {
            return text;
        }
    }

    let page_title = page.title();
    let stripped = page_title.replace(TITLE_SUFFIX, "");
    let stripped = stripped.trim();
    if stripped.is_empty() || stripped == "Google Docs" {
        "Untitled Document".to_string()
    } else {
        stripped.to_string()
    }
}
