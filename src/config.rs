//! Endpoint configuration shared between the application and the client.

use std::sync::{Arc, RwLock};

/// Current API endpoint configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Cheaply cloneable handle to the live [`ApiConfig`].
///
/// The dispatcher reads the handle on every call, so a base-URL change made
/// through any clone applies to subsequent calls but never to calls already
/// in flight.
#[derive(Clone, Debug)]
pub struct ConfigHandle {
    inner: Arc<RwLock<ApiConfig>>,
}

impl ConfigHandle {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Snapshot of the current configuration.
    pub fn api_config(&self) -> ApiConfig {
        self.inner.read().expect("config lock poisoned").clone()
    }

    pub fn base_url(&self) -> String {
        self.inner
            .read()
            .expect("config lock poisoned")
            .base_url
            .clone()
    }

    pub fn set_base_url(&self, base_url: impl Into<String>) {
        self.inner.write().expect("config lock poisoned").base_url = base_url.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_update_is_visible_to_later_reads() {
        let handle = ConfigHandle::new(ApiConfig {
            base_url: "http://one.example".to_string(),
        });
        assert_eq!(handle.base_url(), "http://one.example");

        handle.set_base_url("http://two.example");
        assert_eq!(handle.base_url(), "http://two.example");
    }

    #[test]
    fn clones_share_the_same_configuration() {
        let handle = ConfigHandle::new(ApiConfig {
            base_url: "http://one.example".to_string(),
        });
        let clone = handle.clone();

        clone.set_base_url("http://two.example");
        assert_eq!(handle.api_config().base_url, "http://two.example");
    }
}
