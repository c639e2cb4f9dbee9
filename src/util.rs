use reqwest::StatusCode;

const BODY_PREVIEW_CHARS: usize = 200;

/// First 200 characters of a response body, with `...` appended when
/// the body was longer. Used when the server returns non-JSON.
pub(crate) fn truncate_body(text: &str) -> String {
    let mut out: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
    if text.chars().count() > BODY_PREVIEW_CHARS {
        out.push_str("...");
    }
    out
}

pub(crate) fn status_reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}
