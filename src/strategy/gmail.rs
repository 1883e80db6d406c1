//! Gmail message view.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::{base_result, compose_email, email_metadata, host, Strategy};
use crate::error::{Error, Result};
use crate::options::ExtractionOptions;
use crate::page::Page;
use crate::query;
use crate::result::{EmailProvider, ExtractionResult, SiteType};
use crate::text::{char_len, clean};

pub(crate) const STRATEGY: Strategy = Strategy {
    site_type: SiteType::Gmail,
    name: "gmail",
    detect,
    run: extract,
};

const SUBJECT: &[&str] = &["h2.hP", ".ha h2", "[data-subject]", ".subject"];

const BODY: &[&str] = &[
    ".a3s.aiL",
    ".ii.gt",
    r#"[role="listitem"] .a3s"#,
    ".gs .a3s",
    r#"[role="main"]"#,
];

const THREAD: &[&str] = &[r#"[role="listitem"]"#, ".message", ".thread-item"];

const SENDER: &[&str] = &["span[email]", ".gD", ".go", "[data-hovercard-id]"];

const THREAD_SEPARATOR: &str = "\n\n---\n\n";

/// "Subject - someone@example.com - Gmail"
#[allow(clippy::expect_used)]
static TITLE_SUBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*-\s*.*@").expect("TITLE_SUBJECT regex"));

fn detect(url: &Url) -> bool {
    host(url).contains("mail.google.com")
}

fn extract(page: &dyn Page, _options: &ExtractionOptions) -> Result<ExtractionResult> {
    let subject = subject(page);
    let (body, method) = body(page);
    let sender = sender(page);

    let content = compose_email(&subject, &sender, &body)
        .ok_or_else(|| Error::NoContent("No email content found".to_string()))?;
    tracing::debug!(method, subject_len = char_len(&subject), body_len = char_len(&body), "gmail message extracted");

    let result = base_result(
        page,
        content,
        email_metadata(SiteType::Gmail, EmailProvider::Gmail, method),
    );
    if subject.is_empty() {
        Ok(result)
    } else {
        Ok(ExtractionResult {
            title: subject,
            ..result
        })
    }
}

fn subject(page: &dyn Page) -> String {
    if let Some(el) = query::first_match(page, SUBJECT) {
        return clean(el.text());
    }
    TITLE_SUBJECT
        .captures(&page.title())
        .and_then(|caps| caps.get(1))
        .map(|m| clean(m.as_str()))
        .unwrap_or_default()
}

fn body(page: &dyn Page) -> (String, &'static str) {
    let body = query::first_match(page, BODY)
        .map(|el| clean(el.text()))
        .unwrap_or_default();
    if !body.is_empty() {
        return (body, "gmail-dom");
    }
    (thread(page), "gmail-thread")
}

/// Every message of a conversation, separated by a rule.
fn thread(page: &dyn Page) -> String {
    let messages: Vec<String> = query::all_matches(page, THREAD)
        .iter()
        .map(|el| clean(el.text()))
        .filter(|text| !text.is_empty())
        .collect();
    tracing::debug!(messages = messages.len(), "gmail thread fallback");
    messages.join(THREAD_SEPARATOR)
}

/// The `email` attribute beats the display name.
fn sender(page: &dyn Page) -> String {
    let Some(el) = query::first_match(page, SENDER) else {
        return String::new();
    };
    match el.attr("email").map(str::trim) {
        Some(email) if !email.is_empty() => email.to_string(),
        _ => clean(el.text()),
    }
}
