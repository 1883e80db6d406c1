//! Outlook Web App (`outlook.office.com`, `outlook.live.com`).

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::{base_result, compose_email, email_metadata, host, Strategy};
use crate::error::{Error, Result};
use crate::options::ExtractionOptions;
use crate::page::Page;
use crate::query;
use crate::result::{EmailProvider, ExtractionResult, SiteType};
use crate::text::clean;

pub(crate) const STRATEGY: Strategy = Strategy {
    site_type: SiteType::Outlook,
    name: "outlook",
    detect,
    run: extract,
};

const HOSTS: &[&str] = &["outlook.office.com", "outlook.live.com"];

const SUBJECT: &[&str] = &[
    ".SubjectLine",
    r#"[role="heading"]"#,
    ".ReadingPaneSubject",
    r#"[aria-label*="Subject"]"#,
    "h2",
];

const BODY: &[&str] = &[
    r#"[role="article"]"#,
    ".UniqueMessageBody",
    ".MessageBody",
    ".ReadingPaneContent",
    r#"[aria-label*="Message body"]"#,
];

const MAIN: &[&str] = &[r#"[role="main"]"#];

const SENDER: &[&str] = &[
    ".FromField",
    r#"[aria-label*="From"]"#,
    ".Sender",
    r#"[data-test-id*="sender"]"#,
];

#[allow(clippy::expect_used)]
static TITLE_SUBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*-\s*Outlook").expect("TITLE_SUBJECT regex"));

#[allow(clippy::expect_used)]
static FROM_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^From:\s*").expect("FROM_PREFIX regex"));

fn detect(url: &Url) -> bool {
    let host = host(url);
    HOSTS.iter().any(|h| host.contains(h))
}

fn extract(page: &dyn Page, _options: &ExtractionOptions) -> Result<ExtractionResult> {
    let subject = subject(page);
    let (body, method) = body(page);
    let sender = sender(page);

    let content = compose_email(&subject, &sender, &body)
        .ok_or_else(|| Error::NoContent("No email content found in Outlook".to_string()))?;

    let result = base_result(
        page,
        content,
        email_metadata(SiteType::Outlook, EmailProvider::Outlook, method),
    );
    Ok(if subject.is_empty() {
        result
    } else {
        ExtractionResult {
            title: subject,
            ..result
        }
    })
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
    if let Some(el) = query::first_match(page, BODY) {
        return (clean(el.text()), "outlook-dom");
    }
    let main = query::first_match(page, MAIN)
        .map(|el| clean(el.text()))
        .unwrap_or_default();
    (main, "outlook-main")
}

fn sender(page: &dyn Page) -> String {
    query::first_match(page, SENDER)
        .map(|el| FROM_PREFIX.replace(&clean(el.text()), "").trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HtmlPage;

    fn page(html: &str) -> HtmlPage {
        HtmlPage::new(html, "https://outlook.office.com/mail/inbox/id/AAQk").expect("valid page")
    }

    #[test]
    fn detects_both_outlook_hosts() {
        for url in ["https://outlook.office.com/mail/", "https://outlook.live.com/mail/0/"] {
            assert!(detect(&Url::parse(url).expect("url")), "{url}");
        }
        assert!(!detect(&Url::parse("https://www.office.com/").expect("url")));
    }

    #[test]
    fn sender_strips_from_prefix() {
        let page = page(r#"<div class="FromField">from:  Carol &lt;carol@example.com&gt;</div>"#);
        assert_eq!(sender(&page), "Carol <carol@example.com>");
    }

    #[test]
    fn subject_from_title_pattern() {
        let page = page("<title>Quarterly numbers - Outlook</title>");
        assert_eq!(subject(&page), "Quarterly numbers");
    }

    #[test]
    fn body_falls_back_to_main_region() {
        let page = page(r#"<div role="main">Message in the main pane</div>"#);
        assert_eq!(body(&page), ("Message in the main pane".to_string(), "outlook-main"));
    }
}
