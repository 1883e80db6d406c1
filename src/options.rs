//! Configuration options for content extraction.
//!
//! `ExtractionOptions` is what the caller sends across the transport. The
//! nested `Thresholds` hold the substantiveness constants used by the
//! strategies; they are not part of the wire format.

use serde::{Deserialize, Deserializer};

/// Per-call extraction options.
///
/// Deserializes from the transport's camelCase JSON. Missing fields take
/// their defaults.
///
/// # Example
///
/// ```rust
/// use page_context::ExtractionOptions;
///
/// let options: ExtractionOptions =
///     serde_json::from_str(r#"{"includeSelected": true, "maxLength": 4000}"#)?;
/// assert!(options.include_selected);
/// assert_eq!(options.effective_cap(), Some(4000));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionOptions {
    /// Capture the user's current text selection into `selected_text`.
    ///
    /// Default: `false`
    pub include_selected: bool,

    /// Maximum content length in characters.
    ///
    /// Accepts any JSON number: fractions are floored, negatives are unset.
    ///
    /// Default: `None` (no truncation)
    #[serde(deserialize_with = "lenient_length")]
    pub max_length: Option<usize>,

    /// Synonym for `max_length`, sent by callers that think in model limits.
    ///
    /// Default: `None`
    #[serde(deserialize_with = "lenient_length")]
    pub model_limit: Option<usize>,

    /// Substantiveness thresholds.
    #[serde(skip)]
    pub thresholds: Thresholds,
}

impl ExtractionOptions {
    /// The length cap that applies to this call.
    ///
    /// The smallest positive value among `max_length` and `model_limit`.
    /// Zero is treated as "not set".
    #[must_use]
    pub fn effective_cap(&self) -> Option<usize> {
        [self.max_length, self.model_limit]
            .into_iter()
            .flatten()
            .filter(|&n| n > 0)
            .min()
    }
}

/// Minimum character counts below which extracted text counts as noise.
///
/// The defaults were chosen empirically for the supported sites and are
/// not tuned for every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// A semantic landmark (`main`, `article`, ...) must exceed this.
    ///
    /// Default: `100`
    pub semantic_min_len: usize,

    /// The largest `div`/`section`/`article` must exceed this.
    ///
    /// Default: `200`
    pub largest_block_min_len: usize,

    /// A portal page (non-document mode) needs at least this much text.
    ///
    /// Default: `50`
    pub portal_page_min_len: usize,

    /// Cap used by the emergency fallback when the caller sets none.
    ///
    /// Default: `10_000`
    pub emergency_max_len: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            semantic_min_len: 100,
            largest_block_min_len: 200,
            portal_page_min_len: 50,
            emergency_max_len: 10_000,
        }
    }
}

/// A length from any JSON number. Fractions are floored; negative values
/// and `null` mean "not set".
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lenient_length<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.floor() as usize))
}
