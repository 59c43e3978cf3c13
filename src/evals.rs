//! Eval resource accessor.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::{
    client::ClientInner,
    errors::{to_transport_error, Error, Result, ValidationError},
    http::{api_error_from_parts, RequestOptions},
};

#[derive(Serialize)]
struct UpdateAuthorRequest<'a> {
    author: &'a str,
}

/// Client for eval mutations.
#[derive(Clone)]
pub struct EvalsClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl EvalsClient {
    /// Set the author on an eval record.
    ///
    /// This is a write: a non-success response is an error the caller must
    /// handle, never silently absorbed. On success the response body is
    /// returned as parsed JSON.
    pub async fn update_author(&self, eval_id: &str, author: &str) -> Result<Value> {
        if eval_id.trim().is_empty() {
            return Err(Error::Validation(
                ValidationError::new("eval_id is required").with_field("eval_id"),
            ));
        }

        let path = format!("/eval/{eval_id}/author");
        let options = RequestOptions::default()
            .with_method(Method::PATCH)
            .with_header("Content-Type", "application/json")
            .with_json(&UpdateAuthorRequest { author })?;

        let resp = self.inner.dispatch(&path, options).await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(api_error_from_parts(status, body));
        }
        let bytes = resp.bytes().await.map_err(to_transport_error)?;
        serde_json::from_slice(&bytes).map_err(Error::Serialization)
    }
}
