//! SharePoint and Office portal.
//!
//! Two modes. A document viewer (Word/Excel/PowerPoint in the browser)
//! renders into an iframe this page cannot read, so document mode only
//! collects the identifiers a caller needs to fetch the file through the
//! document API and sets `needsApiExtraction`. Every other portal page is
//! read like a regular page.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::{base_result, host, query_param, Strategy};
use crate::error::{Error, Result};
use crate::options::ExtractionOptions;
use crate::page::Page;
use crate::query;
use crate::result::{ExtractionMetadata, ExtractionResult, SiteType};
use crate::text::{char_len, clean};

pub(crate) const STRATEGY: Strategy = Strategy {
    site_type: SiteType::SharePoint,
    name: "sharepoint",
    detect,
    run: extract,
};

const HOSTS: &[&str] = &["sharepoint.com", "office.com", "office365.com"];

const VIEWER_PATHS: &[&str] = &["_layouts/15/Doc.aspx", "_layouts/15/WopiFrame.aspx"];

/// WOPI source document locator, in priority order.
const SOURCE_DOC_PARAMS: &[&str] = &["sourcedoc", "sourcedocid", "docid"];

const FILE_URL_PARAMS: &[&str] = &["file", "url"];

const PAGE_CONTENT: &[&str] = &[
    r#"[role="main"]"#,
    ".od-ItemsScopeList",
    "#contentBox",
    ".ms-webpart-chrome-title",
    ".CanvasZone",
];

/// Content while the document API fetch is pending.
pub const DOCUMENT_PLACEHOLDER: &str = "Document content loading...";

const UNKNOWN_DOCUMENT: &str = "Unknown Document";

/// " - Site Name" and anything after it.
#[allow(clippy::expect_used)]
static SITE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+-\s+.*$").expect("SITE_SUFFIX regex"));

#[allow(clippy::expect_used)]
static FILE_IN_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)/([^/]+\.(?:docx?|xlsx?|pptx?|pdf))$").expect("FILE_IN_PATH regex")
});

fn detect(url: &Url) -> bool {
    let host = host(url);
    HOSTS.iter().any(|h| host.contains(h))
}

fn extract(page: &dyn Page, options: &ExtractionOptions) -> Result<ExtractionResult> {
    if is_document_viewer(page.url()) {
        Ok(document(page))
    } else {
        page_content(page, options.thresholds.portal_page_min_len)
    }
}

/// Viewer path segment or an embedded `sourcedoc=` parameter.
pub(crate) fn is_document_viewer(url: &Url) -> bool {
    let path = url.path();
    VIEWER_PATHS.iter().any(|p| path.contains(p))
        || url.query().is_some_and(|q| q.contains("sourcedoc="))
}

fn document(page: &dyn Page) -> ExtractionResult {
    let url = page.url();
    let source_doc = query_param(url, SOURCE_DOC_PARAMS);
    let file_name = file_name(page);
    let document_url = query_param(url, FILE_URL_PARAMS).unwrap_or_else(|| url.to_string());
    tracing::debug!(
        file_name = file_name.as_deref().unwrap_or_default(),
        has_source_doc = source_doc.is_some(),
        "sharepoint document viewer"
    );

    let metadata = ExtractionMetadata {
        is_document: Some(true),
        needs_api_extraction: Some(true),
        file_name: Some(
            file_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_DOCUMENT.to_string()),
        ),
        document_url: Some(document_url),
        source_doc,
        ..ExtractionMetadata::new(SiteType::SharePoint, "sharepoint-document")
    };
    let result = base_result(page, DOCUMENT_PLACEHOLDER.to_string(), metadata);
    match file_name {
        Some(title) => ExtractionResult { title, ..result },
        None => result,
    }
}

/// Page title without the site suffix, else a file name at the end of the path.
fn file_name(page: &dyn Page) -> Option<String> {
    let title = page.title();
    if !title.is_empty() && !title.contains("SharePoint") {
        let name = SITE_SUFFIX.replace(&title, "");
        let name = name.trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }

    FILE_IN_PATH
        .captures(page.url().path())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn page_content(page: &dyn Page, min_len: usize) -> Result<ExtractionResult> {
    let content = query::first_match(page, PAGE_CONTENT)
        .or_else(|| page.body())
        .map(|el| clean(el.text()))
        .unwrap_or_default();
    if char_len(&content) < min_len {
        return Err(Error::NoContent("No SharePoint page content found".to_string()));
    }

    let metadata = ExtractionMetadata {
        is_document: Some(false),
        ..ExtractionMetadata::new(SiteType::SharePoint, "sharepoint-page")
    };
    Ok(base_result(page, content, metadata))
}
