use page_context::message::{handle_message, Response};
use page_context::HtmlPage;

fn gmail_page() -> HtmlPage {
    HtmlPage::new(
        r#"<h2 class="hP">Invoice #42</h2><div class="a3s aiL">Please see attached.</div>"#,
        "https://mail.google.com/mail/u/0/",
    )
    .expect("valid page")
    .with_selection("attached")
}

#[test]
fn extract_content_round_trip_over_json() {
    let response = handle_message(
        &gmail_page(),
        r#"{"action":"EXTRACT_CONTENT","options":{"includeSelected":true}}"#,
    );

    let json = serde_json::to_value(&response).expect("serializable");
    assert_eq!(json["success"], true);
    assert_eq!(json["title"], "Invoice #42");
    assert_eq!(json["hostname"], "mail.google.com");
    assert_eq!(json["selectedText"], "attached");
    assert_eq!(json["metadata"]["siteType"], "gmail");
    assert_eq!(json["metadata"]["emailProvider"], "gmail");
    assert_eq!(json["metadata"]["isEmail"], true);
    assert!(json.get("error").is_none());
}

#[test]
fn failed_extraction_serializes_error_and_empty_content() {
    let page = HtmlPage::new("", "https://docs.google.com/spreadsheets/u/0/").expect("valid page");

    let response = handle_message(&page, r#"{"action":"EXTRACT_CONTENT"}"#);

    let json = serde_json::to_value(&response).expect("serializable");
    assert_eq!(json["success"], false);
    assert_eq!(json["content"], "");
    assert_eq!(json["error"], "Could not extract document ID from URL");
    assert_eq!(json["metadata"]["extractionMethod"], "error");
    assert!(json["metadata"].get("needsExport").is_none());
}

#[test]
fn ping_does_not_touch_the_page() {
    let response = handle_message(&gmail_page(), r#"{"action":"ping"}"#);
    assert_eq!(response, Response::Status { status: "ready" });
}

#[test]
fn computed_limits_from_callers_are_accepted() {
    for raw in [
        r#"{"action":"EXTRACT_CONTENT","options":{"maxLength":8.7}}"#,
        r#"{"action":"EXTRACT_CONTENT","options":{"maxLength":-1,"modelLimit":8}}"#,
    ] {
        let json = serde_json::to_value(handle_message(&gmail_page(), raw)).expect("serializable");
        assert_eq!(json["success"], true, "{raw}");
        assert_eq!(json["content"], "Subject:", "{raw}");
        assert_eq!(json["metadata"]["truncated"], true, "{raw}");
    }
}
