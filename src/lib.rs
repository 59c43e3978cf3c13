//! Minimal Rust SDK for the EvalDeck web API.
//!
//! Covers the request dispatcher, the user/eval resource accessors built on
//! it, and normalization of Ollama model catalogs into generation configs.

/// Default API base URL (local eval server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:15500";

/// Path prefix prepended to every dispatched API path.
pub const API_PREFIX: &str = "/api";

/// Default User-Agent header value.
pub(crate) const DEFAULT_CLIENT_HEADER: &str = concat!("evaldeck-rust/", env!("CARGO_PKG_VERSION"));

pub mod catalog;
mod client;
mod config;
mod errors;
mod evals;
mod http;
mod users;

pub use catalog::{
    fetch_model_configs, fetch_model_configs_with, normalize_models, qualified_model_id,
    GenerationDefaults, ModelDescriptor, ModelDetails, NormalizedModelConfig, MODEL_ID_PREFIX,
};
pub use client::{Client, Config};
pub use config::{ApiConfig, ConfigHandle};
pub use errors::{
    ApiError, Error, Result, TransportError, TransportErrorKind, ValidationError,
};
pub use evals::EvalsClient;
pub use http::{HeaderEntry, HeaderList, RequestOptions};
pub use users::UsersClient;
