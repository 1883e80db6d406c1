//! Emergency extraction.
//!
//! A self-contained, reduced version of the generic strategy for hosts
//! that inject a single function into the page when the regular entry
//! point is not loaded yet. It does no site detection; it only looks
//! for a content landmark, records the selection and hostname, and
//! produces the same [`ExtractionResult`] shape.

use crate::extract::guarded;
use crate::options::ExtractionOptions;
use crate::page::Page;
use crate::query;
use crate::result::{ExtractionMetadata, ExtractionResult, SiteType};
use crate::strategy::{apply_options, base_result, error_result};
use crate::text::clean;

const LANDMARKS: &[&str] = &["main", r#"[role="main"]"#, "article", ".content"];

/// Extract with the emergency path.
///
/// Without a caller cap, content is capped at
/// `options.thresholds.emergency_max_len`.
pub fn emergency_extract(page: &dyn Page, options: &ExtractionOptions) -> ExtractionResult {
    guarded(page, SiteType::Generic, || {
        let content = query::first_match(page, LANDMARKS)
            .or_else(|| page.body())
            .map(|el| clean(el.text()))
            .unwrap_or_default();
        if content.is_empty() {
            return error_result(page, SiteType::Generic, "No content found on page");
        }

        let result = base_result(
            page,
            content,
            ExtractionMetadata::new(SiteType::Generic, "emergency-fallback"),
        );
        if options.effective_cap().is_some() {
            return apply_options(result, page, options);
        }
        let capped = ExtractionOptions {
            max_length: Some(options.thresholds.emergency_max_len),
            ..options.clone()
        };
        apply_options(result, page, &capped)
    })
}
