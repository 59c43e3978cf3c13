//! User resource accessor.

use std::sync::Arc;

use serde::Deserialize;

use crate::{
    client::ClientInner,
    errors::{to_transport_error, Error, Result},
    http::{api_error_from_parts, RequestOptions},
};

#[derive(Deserialize)]
struct EmailResponse {
    #[serde(default)]
    email: Option<String>,
}

/// Client for user-scoped reads.
#[derive(Clone)]
pub struct UsersClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl UsersClient {
    /// Fetch the current user's email.
    ///
    /// Best-effort read: a non-success status, an undecodable body, or a
    /// transport failure is logged and collapses to `None`. A success body
    /// without an `email` field is also `None`; the field is not otherwise
    /// validated.
    pub async fn email(&self) -> Option<String> {
        match self.fetch_email().await {
            Ok(email) => email,
            Err(err) => {
                tracing::warn!(error = %err, "failed to fetch user email");
                None
            }
        }
    }

    async fn fetch_email(&self) -> Result<Option<String>> {
        let resp = self
            .inner
            .dispatch("/user/email", RequestOptions::default())
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(api_error_from_parts(status, body));
        }
        let bytes = resp.bytes().await.map_err(to_transport_error)?;
        let payload: EmailResponse = serde_json::from_slice(&bytes).map_err(Error::Serialization)?;
        Ok(payload.email)
    }
}
