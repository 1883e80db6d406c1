//! Strategy selection and the extraction entry point.
//!
//! One call runs `Detecting -> Extracting -> Success | Failed` to completion
//! with no shared state between calls. Strategies already turn their own
//! errors into failed results; a panic escaping a strategy (or the page
//! accessor) is caught here and reported under the selected strategy's
//! site type, so nothing ever unwinds past [`extract`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use url::Url;

use crate::options::ExtractionOptions;
use crate::page::Page;
use crate::result::{ExtractionResult, SiteType};
use crate::strategy::{failed_result, Strategy, GENERIC, STRATEGIES};
use crate::text::char_len;

/// The first strategy whose `detect` accepts `url`, else the generic one.
#[must_use]
pub fn select_strategy(url: &Url) -> &'static Strategy {
    STRATEGIES
        .iter()
        .find(|strategy| strategy.detect(url))
        .unwrap_or(&GENERIC)
}

/// Extract the current page. Never panics and never returns an error:
/// failures come back as `success: false`.
///
/// A panic while running the selected strategy is reported under that
/// strategy's site type; only a panic during selection reports `Generic`.
pub fn extract(page: &dyn Page, options: &ExtractionOptions) -> ExtractionResult {
    let strategy = match panic::catch_unwind(AssertUnwindSafe(|| select_strategy(page.url()))) {
        Ok(strategy) => strategy,
        Err(payload) => return failure(page, SiteType::Generic, &panic_message(&*payload)),
    };
    tracing::debug!(strategy = strategy.name(), "strategy selected");

    guarded(page, strategy.site_type(), || {
        let result = strategy.extract(page, options);
        tracing::debug!(
            success = result.success,
            site_type = %result.metadata.site_type,
            method = %result.metadata.extraction_method,
            content_len = char_len(&result.content),
            has_selection = result.selected_text.is_some(),
            "extraction finished"
        );
        result
    })
}

/// Run `f`, converting a panic into a failed result for `site_type`.
pub(crate) fn guarded(
    page: &dyn Page,
    site_type: SiteType,
    f: impl FnOnce() -> ExtractionResult,
) -> ExtractionResult {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(&*payload);
            tracing::warn!(error = %message, %site_type, "extraction panicked");
            failure(page, site_type, &message)
        }
    }
}

fn failure(page: &dyn Page, site_type: SiteType, error: &str) -> ExtractionResult {
    // The page accessor itself may be what panicked.
    let read = |f: &dyn Fn() -> String| {
        panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_default()
    };
    failed_result(
        read(&|| page.title()),
        read(&|| page.url().to_string()),
        read(&|| page.hostname().to_string()),
        site_type,
        error,
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Unknown extraction error".to_string())
}
