//! Error types for page-context.
//!
//! These never cross the public `extract` boundary: strategies convert them
//! into `success: false` results. They are public so callers building a
//! [`crate::HtmlPage`] or implementing [`crate::Page`] can report failures.

/// Error type for extraction internals and page construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The document editor URL carries no `/d/<id>` segment.
    #[error("Could not extract document ID from URL")]
    MissingDocumentId,

    /// Every candidate for the detected site yielded too little text.
    #[error("{0}")]
    NoContent(String),

    /// A CSS selector could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// The page address could not be parsed.
    #[error("Invalid page URL: {0}")]
    InvalidUrl(String),

    /// The host refused or failed a DOM read.
    #[error("DOM access failed: {0}")]
    Dom(String),
}

/// Result type alias for extraction internals.
pub type Result<T> = std::result::Result<T, Error>;
