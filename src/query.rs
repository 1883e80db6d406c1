//! Prioritized selector helpers.
//!
//! Site markup drifts between vendor releases, so every lookup is a list of
//! candidate selectors tried in order. A selector the engine cannot parse is
//! logged and skipped; it never fails the extraction.

use crate::error::Result;
use crate::page::{Element, Page};

/// First element matched by the earliest selector that matches anything.
pub fn first_match(page: &dyn Page, selectors: &[&str]) -> Option<Element> {
    selectors
        .iter()
        .find_map(|selector| skip_invalid(selector, page.query_selector(selector)).flatten())
}

/// Every element matched by every selector, concatenated in selector order.
pub fn all_matches(page: &dyn Page, selectors: &[&str]) -> Vec<Element> {
    selectors
        .iter()
        .filter_map(|selector| skip_invalid(selector, page.query_selector_all(selector)))
        .flatten()
        .collect()
}

/// First match of each selector, in selector order.
///
/// Used where every candidate must be weighed, not just the first hit.
pub fn candidates(page: &dyn Page, selectors: &[&str]) -> Vec<Element> {
    selectors
        .iter()
        .filter_map(|selector| skip_invalid(selector, page.query_selector(selector)).flatten())
        .collect()
}

fn skip_invalid<T>(selector: &str, found: Result<T>) -> Option<T> {
    match found {
        Ok(found) => Some(found),
        Err(err) => {
            tracing::warn!(selector, error = %err, "skipping selector");
            None
        }
    }
}
