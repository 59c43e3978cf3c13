use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::errors::{ApiError, Error, Result};

/// Optional per-call options for the dispatcher.
#[derive(Clone, Default)]
pub struct RequestOptions {
    /// HTTP method; GET when unset.
    pub method: Option<Method>,
    pub headers: HeaderList,
    /// Raw request body, typically JSON text.
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .push(HeaderEntry::new(key.into(), value.into()));
        self
    }

    /// Serialize `body` to JSON and use it as the request body.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_string(body).map_err(Error::Serialization)?);
        Ok(self)
    }
}

/// Structured header list with validation.
#[derive(Clone, Debug, Default)]
pub struct HeaderList(Vec<HeaderEntry>);

impl HeaderList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a header entry.
    ///
    /// # Panics
    /// Panics if the header key or value is empty or contains only whitespace.
    /// This is a fail-fast behavior to catch configuration errors early.
    pub fn push(&mut self, entry: HeaderEntry) {
        assert!(
            entry.is_valid(),
            "Invalid header: key and value must be non-empty (got key={:?}, value={:?})",
            entry.key,
            entry.value
        );
        self.0.push(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderEntry> {
        self.0.iter()
    }
}

#[derive(Clone, Debug)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: String, value: String) -> Self {
        Self { key, value }
    }

    pub fn is_valid(&self) -> bool {
        !(self.key.trim().is_empty() || self.value.trim().is_empty())
    }
}

/// Build an [`ApiError`] from a non-success response's status and body.
///
/// The server reports failures as `{"error": "..."}` or `{"message": "..."}`;
/// anything else falls back to the status text with the body kept raw.
pub(crate) fn api_error_from_parts(status: StatusCode, body: String) -> Error {
    let status_code = status.as_u16();
    let status_text = status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string();

    if body.is_empty() {
        return ApiError {
            status: status_code,
            message: status_text,
            raw_body: None,
        }
        .into();
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        let message = value
            .get("error")
            .and_then(|v| v.as_str())
            .or_else(|| value.get("message").and_then(|v| v.as_str()));
        if let Some(message) = message {
            return ApiError {
                status: status_code,
                message: message.to_string(),
                raw_body: Some(body.clone()),
            }
            .into();
        }
    }

    ApiError {
        status: status_code,
        message: status_text,
        raw_body: Some(body),
    }
    .into()
}
