//! Shared HTTP client and auth utilities.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::HandoffError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(4)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new())
    })
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Map a non-success HTTP status to an error.
pub fn status_to_error(status: u16, body: &str) -> HandoffError {
    let message = extract_error_message(body).unwrap_or_else(|| body.to_string());
    match status {
        401 | 403 => HandoffError::Authentication(message),
        _ => HandoffError::api(status, message),
    }
}

/// Pull `error.message` out of an OpenAI-style error body.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    // Some compatible servers return a bare list of errors.
    let error = error.as_array().and_then(|list| list.first()).unwrap_or(error);
    error
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_401_maps_to_authentication() {
        let err = status_to_error(401, r#"{"error":{"message":"bad key"}}"#);
        assert!(matches!(err, HandoffError::Authentication(msg) if msg == "bad key"));
    }

    #[test]
    fn status_500_keeps_raw_body_when_not_json() {
        let err = status_to_error(500, "upstream exploded");
        assert!(matches!(
            err,
            HandoffError::Api { status: 500, message } if message == "upstream exploded"
        ));
    }

    #[test]
    fn error_list_uses_first_message() {
        let err = status_to_error(400, r#"{"error":[{"message":"first"},{"message":"second"}]}"#);
        assert!(matches!(err, HandoffError::Api { message, .. } if message == "first"));
    }

    #[test]
    fn bearer_headers_include_authorization() {
        let headers = bearer_headers("sk-test");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-test");
    }
}
