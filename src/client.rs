use std::sync::Arc;

use reqwest::{
    header::{HeaderName, HeaderValue},
    Method, Response,
};

use crate::{
    config::{ApiConfig, ConfigHandle},
    errors::{to_transport_error, Error, Result, TransportError, TransportErrorKind},
    evals::EvalsClient,
    http::RequestOptions,
    users::UsersClient,
    API_PREFIX, DEFAULT_BASE_URL, DEFAULT_CLIENT_HEADER,
};

#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Base URL of the eval server; defaults to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    pub http_client: Option<reqwest::Client>,
}

#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
pub(crate) struct ClientInner {
    config: ConfigHandle,
    http: reqwest::Client,
}

impl Client {
    pub fn new(cfg: Config) -> Result<Self> {
        let base_url = cfg
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.trim().is_empty() {
            return Err(Error::Config("base url is required".to_string()));
        }
        reqwest::Url::parse(&base_url)
            .map_err(|err| Error::Config(format!("invalid base url: {err}")))?;

        let http = match cfg.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .user_agent(DEFAULT_CLIENT_HEADER)
                .build()
                .map_err(|err| TransportError {
                    kind: TransportErrorKind::Connect,
                    message: "failed to build http client".to_string(),
                    source: Some(err),
                })?,
        };

        Ok(Self {
            inner: Arc::new(ClientInner {
                config: ConfigHandle::new(ApiConfig { base_url }),
                http,
            }),
        })
    }

    /// Handle to the endpoint configuration.
    ///
    /// Updates made through the handle apply to every subsequent call.
    pub fn config(&self) -> ConfigHandle {
        self.inner.config.clone()
    }

    pub fn users(&self) -> UsersClient {
        UsersClient {
            inner: self.inner.clone(),
        }
    }

    pub fn evals(&self) -> EvalsClient {
        EvalsClient {
            inner: self.inner.clone(),
        }
    }

    /// Dispatch a request against `base_url + "/api" + path` and return the
    /// raw response.
    ///
    /// The status code is not inspected and the body is not read; a non-2xx
    /// response is returned as-is for the caller to interpret. Only transport
    /// failures are errors.
    pub async fn call(&self, path: &str, options: RequestOptions) -> Result<Response> {
        self.inner.dispatch(path, options).await
    }
}

impl ClientInner {
    pub(crate) async fn dispatch(&self, path: &str, options: RequestOptions) -> Result<Response> {
        // Re-read on every dispatch so configuration changes apply to
        // subsequent calls without rebuilding the client.
        let base_url = self.config.base_url();
        let target = format!("{base_url}{API_PREFIX}{path}");
        let url = reqwest::Url::parse(&target)
            .map_err(|err| Error::Config(format!("invalid request url {target:?}: {err}")))?;

        let method = options.method.unwrap_or(Method::GET);
        tracing::debug!(method = %method, path, "dispatching api request");

        let mut builder = self.http.request(method, url);
        for entry in options.headers.iter() {
            if !entry.is_valid() {
                continue;
            }
            let name = HeaderName::from_bytes(entry.key.trim().as_bytes())
                .map_err(|err| Error::Config(format!("invalid header name: {err}")))?;
            let value = HeaderValue::from_str(entry.value.trim())
                .map_err(|err| Error::Config(format!("invalid header value: {err}")))?;
            builder = builder.header(name, value);
        }
        if let Some(body) = options.body {
            builder = builder.body(body);
        }

        builder.send().await.map_err(to_transport_error)
    }
}
