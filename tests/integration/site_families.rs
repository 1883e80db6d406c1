use page_context::{extract_bytes, extract_html, EmailProvider, ExtractionOptions, SiteType};

fn run(html: &str, url: &str) -> page_context::ExtractionResult {
    extract_html(html, url, &ExtractionOptions::default()).expect("valid url")
}

#[test]
fn outlook_message_with_sender() {
    let html = r#"
        <html><head><title>Mail - Pat - Outlook</title></head><body>
            <div class="SubjectLine">Contract renewal</div>
            <div class="FromField">From: Legal Team</div>
            <div role="article"><p>The renewal is due on the first.</p></div>
        </body></html>
    "#;

    let result = run(html, "https://outlook.office.com/mail/inbox/id/AAMk");

    assert!(result.success);
    assert_eq!(result.metadata.site_type, SiteType::Outlook);
    assert_eq!(result.metadata.email_provider, Some(EmailProvider::Outlook));
    assert_eq!(result.metadata.is_outlook, Some(true));
    assert_eq!(result.metadata.is_gmail, Some(false));
    assert_eq!(result.title, "Contract renewal");
    assert_eq!(
        result.content,
        "Subject: Contract renewal\n\nFrom: Legal Team\n\nThe renewal is due on the first."
    );
}

#[test]
fn outlook_without_subject_keeps_page_title() {
    let html = r#"<title>Inbox</title><div class="MessageBody">Just a body.</div>"#;

    let result = run(html, "https://outlook.live.com/mail/0/");

    assert!(result.success);
    assert_eq!(result.title, "Inbox");
    assert_eq!(result.content, "Just a body.");
}

#[test]
fn outlook_empty_view_fails() {
    let result = run("<title>Mail</title>", "https://outlook.office.com/mail/");

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("No email content found in Outlook"));
    assert_eq!(result.metadata.site_type, SiteType::Outlook);
}

#[test]
fn gmail_thread_fallback_joins_messages() {
    let html = r#"
        <title>Re: Launch - me@example.com - Gmail</title>
        <div role="listitem">Can we ship Friday?</div>
        <div role="listitem">Yes, after the review.</div>
    "#;

    let result = run(html, "https://mail.google.com/mail/u/0/#inbox/abc");

    assert!(result.success);
    assert_eq!(result.title, "Re: Launch");
    assert_eq!(result.metadata.extraction_method, "gmail-thread");
    assert_eq!(
        result.content,
        "Subject: Re: Launch\n\nCan we ship Friday?\n\n---\n\nYes, after the review."
    );
}

#[test]
fn sharepoint_short_page_fails() {
    let result = run(
        r#"<title>Site</title><div role="main">Nothing here</div>"#,
        "https://contoso.sharepoint.com/sites/empty",
    );

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("No SharePoint page content found"));
    assert_eq!(result.title, "Site");
}

#[test]
fn wopi_frame_path_selects_document_mode() {
    let result = run(
        "<title>Deck.pptx - Sales</title>",
        "https://contoso.sharepoint.com/_layouts/15/WopiFrame.aspx?sourcedocid=%7Babc%7D",
    );

    assert_eq!(result.metadata.extraction_method, "sharepoint-document");
    assert_eq!(result.metadata.source_doc.as_deref(), Some("{abc}"));
    assert_eq!(result.title, "Deck.pptx");
}

#[test]
fn legacy_charset_bytes_are_decoded() {
    let html = b"<html><head><meta charset=\"windows-1252\"><title>Caf\xE9</title></head><body>Men\xFC du jour</body></html>";

    let result = extract_bytes(html, "https://example.fr/", &ExtractionOptions::default())
        .expect("valid url");

    assert_eq!(result.title, "Café");
    assert_eq!(result.content, "Menü du jour");
}

#[test]
fn invalid_url_is_the_only_error() {
    let err = extract_html("<p>x</p>", "::not a url::", &ExtractionOptions::default())
        .expect_err("bad url");
    assert!(matches!(err, page_context::Error::InvalidUrl(_)));
}
