//! Fallback strategy for any web page.
//!
//! Precedence, first success wins:
//! 1. semantic landmarks (`main`, `article`, common content ids/classes)
//!    whose text exceeds `semantic_min_len`;
//! 2. the `div`/`section`/`article` with the most text, if that exceeds
//!    `largest_block_min_len`;
//! 3. the whole `<body>`.
//!
//! No length cap is applied here beyond the caller's options.

use url::Url;

use super::{base_result, Strategy};
use crate::error::{Error, Result};
use crate::options::{ExtractionOptions, Thresholds};
use crate::page::Page;
use crate::query;
use crate::result::{ExtractionMetadata, ExtractionResult, SiteType};
use crate::text::{char_len, clean};

pub(crate) const STRATEGY: Strategy = Strategy {
    site_type: SiteType::Generic,
    name: "generic",
    detect,
    run: extract,
};

const LANDMARKS: &[&str] = &[
    "main",
    r#"[role="main"]"#,
    "article",
    ".main-content",
    ".content",
    "#content",
    "#main",
];

const BLOCKS: &[&str] = &["div", "section", "article"];

fn detect(_url: &Url) -> bool {
    true
}

fn extract(page: &dyn Page, options: &ExtractionOptions) -> Result<ExtractionResult> {
    let (content, method) = main_content(page, &options.thresholds);
    if content.is_empty() {
        return Err(Error::NoContent("No content found on page".to_string()));
    }
    tracing::debug!(method, len = char_len(&content), "generic content extracted");
    Ok(base_result(
        page,
        content,
        ExtractionMetadata::new(SiteType::Generic, method),
    ))
}

fn main_content(page: &dyn Page, thresholds: &Thresholds) -> (String, &'static str) {
    let landmark = query::candidates(page, LANDMARKS)
        .iter()
        .map(|el| clean(el.text()))
        .find(|text| char_len(text) > thresholds.semantic_min_len);
    if let Some(text) = landmark {
        return (text, "generic-semantic");
    }

    if let Some(text) = largest_block(page, thresholds.largest_block_min_len) {
        return (text, "generic-largest-block");
    }

    let body = page.body().map(|el| clean(el.text())).unwrap_or_default();
    (body, "generic-body")
}

/// Text of the block with the most text; ties go to the earliest.
fn largest_block(page: &dyn Page, min_len: usize) -> Option<String> {
    query::all_matches(page, BLOCKS)
        .iter()
        .map(|el| clean(el.text()))
        .fold(None::<(usize, String)>, |best, text| {
            let len = char_len(&text);
            match best {
                Some((best_len, _)) if best_len >= len => best,
                _ => Some((len, text)),
            }
        })
        .filter(|(len, _)| *len > min_len)
        .map(|(_, text)| text)
}
