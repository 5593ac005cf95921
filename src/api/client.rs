use std::time::Duration;

/// Shared outbound HTTP client. One per server; reqwest pools connections
/// internally so clones are cheap. Redirects are handed back to the caller
/// untouched, which the `/api` proxy relies on.
pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(format!("Lucidia/{}", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

/// Pull a human readable message out of an error body. Understands the
/// FastAPI-style `{"detail": ...}` and the provider's
/// `{"error": {"message": ...}}` shapes.
pub fn error_message_from_body(body: &serde_json::Value) -> Option<String> {
    if let Some(detail) = body.get("detail").and_then(|d| d.as_str()) {
        return Some(detail.to_string());
    }
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}

/// Like [`error_message_from_body`] for a raw body that may not be JSON at
/// all (plain-text 500s, HTML from a fronting proxy).
pub fn error_message_from_text(text: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|body| error_message_from_body(&body))
}
