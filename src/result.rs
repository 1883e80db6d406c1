//! Result types for extraction output.
//!
//! `ExtractionResult` is the only thing the panel and background
//! coordinator ever see from this crate, so its JSON shape is the contract:
//! camelCase keys, optional fields omitted when unset.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Which strategy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteType {
    /// Any page without a dedicated strategy.
    #[serde(rename = "web")]
    Generic,
    /// Gmail webmail.
    #[serde(rename = "gmail")]
    Gmail,
    /// Outlook Web App.
    #[serde(rename = "outlook")]
    Outlook,
    /// Google Docs editor.
    #[serde(rename = "gdocs")]
    GoogleDocs,
    /// SharePoint / Office portal.
    #[serde(rename = "sharepoint")]
    SharePoint,
}

impl SiteType {
    /// Wire name of the site type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "web",
            Self::Gmail => "gmail",
            Self::Outlook => "outlook",
            Self::GoogleDocs => "gdocs",
            Self::SharePoint => "sharepoint",
        }
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Webmail vendor for email results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Google Mail (`mail.google.com`).
    Gmail,
    /// Outlook on the web (`outlook.office.com`, `outlook.live.com`).
    Outlook,
}

/// Strategy-specific annotations.
///
/// `needs_export` and `needs_api_extraction` are hand-off flags: the
/// visible content is partial and a network-capable caller must fetch the
/// real document using the identifiers carried alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionMetadata {
    /// Strategy that handled the page. Set once per call.
    pub site_type: SiteType,
    /// Path that produced the content, e.g. `generic-semantic`, or `error`.
    pub extraction_method: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Set by the webmail strategies.
    pub is_email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Gmail message view.
    pub is_gmail: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Outlook reading pane.
    pub is_outlook: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Vendor of the webmail client.
    pub email_provider: Option<EmailProvider>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Google Docs editor page.
    pub is_google_docs: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// `true` in a portal's document viewer, `false` on a portal page.
    pub is_document: Option<bool>,

    /// Document editor: fetch the full text through the export endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_export: Option<bool>,
    /// Enterprise portal: fetch the file through the document API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_api_extraction: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Google Docs document id taken from `/d/<id>`.
    pub doc_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Display name of the viewed file, or `Unknown Document`.
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// The `file`/`url` query parameter, else the viewer URL.
    pub document_url: Option<String>,
    /// WOPI source document locator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_doc: Option<String>,

    /// Content length before truncation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// `true` when the content was cut to the length cap.
    pub truncated: Option<bool>,

    /// Open-ended annotations not covered above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ExtractionMetadata {
    /// Metadata with only the mandatory discriminant and method set.
    #[must_use]
    pub fn new(site_type: SiteType, extraction_method: impl Into<String>) -> Self {
        Self {
            site_type,
            extraction_method: extraction_method.into(),
            is_email: None,
            is_gmail: None,
            is_outlook: None,
            email_provider: None,
            is_google_docs: None,
            is_document: None,
            needs_export: None,
            needs_api_extraction: None,
            doc_id: None,
            file_name: None,
            document_url: None,
            source_doc: None,
            original_length: None,
            truncated: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Result of one extraction call.
///
/// `success == false` always comes with an empty `content` and a set
/// `error`; `success == true` never carries an `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub success: bool,

    /// Page, document or email-subject title. Never empty.
    pub title: String,

    /// Page address at extraction time.
    pub url: String,

    /// Host part of `url`.
    pub hostname: String,

    /// Normalized body text, empty on failure.
    pub content: String,

    /// The user's selection, only when the caller asked for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// Whether a privileged caller still has to fetch the real content.
    #[must_use]
    pub fn needs_follow_up(&self) -> bool {
        self.metadata.needs_export == Some(true) || self.metadata.needs_api_extraction == Some(true)
    }
}
