//! Route handlers

pub mod api_keys;
pub mod basic;
pub mod chat;
pub mod mcp;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, HandlerResult};

/// Decode a JSON request body
///
/// Bodies are read as raw bytes so that a missing content type, malformed
/// JSON or a wrong shape all surface as a 400 `{"error": ...}` response.
pub(crate) fn json_body<T: DeserializeOwned>(body: &[u8]) -> HandlerResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::bad_request("Request body is required"));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request(format!("Invalid request body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        key: String,
    }

    #[test]
    fn test_json_body() {
        let sample: Sample = json_body(br#"{"key":"abc"}"#).unwrap();
        assert_eq!(sample.key, "abc");

        let err = json_body::<Sample>(b"  ").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Request body is required");

        let err = json_body::<Sample>(br#"{"nokey":1}"#).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("missing field `key`"));

        let err = json_body::<Sample>(b"not json").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
