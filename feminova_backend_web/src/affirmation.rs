// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affirmation request.

use alloc::format;
use alloc::string::String;

use serde::Deserialize;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// Why an affirmation could not be fetched.
#[derive(Debug, thiserror::Error)]
pub enum AffirmationError {
    /// No window, or the request or body read rejected.
    #[error("request failed: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),
    /// The body was not the expected JSON.
    #[error("malformed payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The payload had no usable affirmation.
    #[error("payload has no affirmation")]
    Empty,
}

impl From<JsValue> for AffirmationError {
    fn from(value: JsValue) -> Self {
        Self::Network(format!("{value:?}"))
    }
}

#[derive(Deserialize)]
struct Payload {
    #[serde(default)]
    affirmation: Option<String>,
}

/// Extracts the affirmation from a response body.
pub fn parse_payload(body: &str) -> Result<String, AffirmationError> {
    let payload: Payload = serde_json::from_str(body)?;
    match payload.affirmation {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AffirmationError::Empty),
    }
}

/// Fetches `url` and returns its affirmation.
pub async fn fetch_affirmation(url: &str) -> Result<String, AffirmationError> {
    let window =
        web_sys::window().ok_or_else(|| AffirmationError::Network(String::from("no window")))?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(AffirmationError::Status(response.status()));
    }
    let body = JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or(AffirmationError::Empty)?;
    parse_payload(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_affirmation_field() {
        let text = parse_payload(r#"{"affirmation":"You are enough."}"#).expect("valid payload");
        assert_eq!(text, "You are enough.");
    }

    #[test]
    fn missing_or_blank_field_is_empty() {
        assert!(matches!(parse_payload("{}"), Err(AffirmationError::Empty)));
        assert!(matches!(
            parse_payload(r#"{"affirmation":"  "}"#),
            Err(AffirmationError::Empty)
        ));
    }

    #[test]
    fn garbage_is_json_error() {
        assert!(matches!(parse_payload("<html>"), Err(AffirmationError::Json(_))));
    }
}
