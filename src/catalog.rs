//! Ollama model catalog fetch and normalization.
//!
//! The catalog lives on a different service than the configured eval server,
//! so fetches here go straight at the caller-supplied URL instead of through
//! the dispatcher.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::{to_transport_error, Error, Result},
    http::api_error_from_parts,
};

/// Prefix qualifying catalog model names as Ollama-served.
pub const MODEL_ID_PREFIX: &str = "ollama:";

/// Per-model metadata block in the catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    #[serde(default)]
    pub parent_model: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub families: Option<Vec<String>>,
    #[serde(default)]
    pub parameter_size: String,
    #[serde(default)]
    pub quantization_level: String,
}

/// One model as described by the catalog service (Ollama `/api/tags` shape).
///
/// Only `name` is required; the rest of the schema is accepted leniently and
/// discarded during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub modified_at: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub digest: String,
    #[serde(default)]
    pub details: ModelDetails,
}

#[derive(Deserialize)]
struct ModelListing {
    models: Vec<ModelDescriptor>,
}

/// Fixed generation parameters attached to every normalized model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationDefaults {
    pub organization: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            organization: String::new(),
            temperature: 0.5,
            max_tokens: 1024,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            function_call: None,
            functions: None,
            stop: None,
        }
    }
}

/// Internal model configuration produced from one catalog descriptor.
///
/// Only the descriptor's name survives normalization; size, digest, and
/// family metadata are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedModelConfig {
    pub id: String,
    pub config: GenerationDefaults,
}

impl From<&ModelDescriptor> for NormalizedModelConfig {
    fn from(descriptor: &ModelDescriptor) -> Self {
        Self {
            id: qualified_model_id(&descriptor.name),
            config: GenerationDefaults::default(),
        }
    }
}

/// Apply the `ollama:` prefix to a model name exactly once.
pub fn qualified_model_id(name: &str) -> String {
    if name.starts_with(MODEL_ID_PREFIX) {
        name.to_string()
    } else {
        format!("{MODEL_ID_PREFIX}{name}")
    }
}

/// Normalize a batch of descriptors, preserving input order.
pub fn normalize_models(models: &[ModelDescriptor]) -> Vec<NormalizedModelConfig> {
    models.iter().map(NormalizedModelConfig::from).collect()
}

/// Fetch a model listing from `endpoint` and normalize it.
///
/// Best-effort read: a transport failure, non-success status, or undecodable
/// body is logged and collapses to an empty list.
pub async fn fetch_model_configs(endpoint: &str) -> Vec<NormalizedModelConfig> {
    let http = reqwest::Client::new();
    fetch_model_configs_with(&http, endpoint).await
}

/// Like [`fetch_model_configs`], reusing a caller-supplied HTTP client.
pub async fn fetch_model_configs_with(
    http: &reqwest::Client,
    endpoint: &str,
) -> Vec<NormalizedModelConfig> {
    match try_fetch_model_configs(http, endpoint).await {
        Ok(configs) => configs,
        Err(err) => {
            tracing::warn!(error = %err, endpoint, "failed to fetch model catalog");
            Vec::new()
        }
    }
}

async fn try_fetch_model_configs(
    http: &reqwest::Client,
    endpoint: &str,
) -> Result<Vec<NormalizedModelConfig>> {
    let resp = http.get(endpoint).send().await.map_err(to_transport_error)?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(api_error_from_parts(status, body));
    }
    let bytes = resp.bytes().await.map_err(to_transport_error)?;
    let listing: ModelListing = serde_json::from_slice(&bytes).map_err(Error::Serialization)?;
    Ok(normalize_models(&listing.models))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(name: &str) -> ModelDescriptor {
        ModelDescriptor {
            name: name.to_string(),
            model: name.to_string(),
            modified_at: "2024-05-01T10:00:00.000000000Z".to_string(),
            size: 3_825_819_519,
            digest: "fe938a131f40e6f6d40083c9f0f430a515233eb2edaa6d72eb85c50d64f2300e".to_string(),
            details: ModelDetails {
                parent_model: String::new(),
                format: "gguf".to_string(),
                family: "llama".to_string(),
                families: Some(vec!["llama".to_string()]),
                parameter_size: "7B".to_string(),
                quantization_level: "Q4_0".to_string(),
            },
        }
    }

    #[test]
    fn prefix_applied_to_bare_name() {
        assert_eq!(qualified_model_id("llama2"), "ollama:llama2");
    }

    #[test]
    fn prefix_left_untouched_when_present() {
        assert_eq!(qualified_model_id("ollama:mistral"), "ollama:mistral");
    }

    #[test]
    fn prefix_is_idempotent() {
        let once = qualified_model_id("codellama:13b");
        assert_eq!(qualified_model_id(&once), once);
    }

    #[test]
    fn defaults_carry_fixed_generation_parameters() {
        let defaults = GenerationDefaults::default();
        assert_eq!(defaults.organization, "");
        assert_eq!(defaults.temperature, 0.5);
        assert_eq!(defaults.max_tokens, 1024);
        assert_eq!(defaults.top_p, 1.0);
        assert_eq!(defaults.frequency_penalty, 0.0);
        assert_eq!(defaults.presence_penalty, 0.0);
        assert!(defaults.function_call.is_none());
        assert!(defaults.functions.is_none());
        assert!(defaults.stop.is_none());
    }

    #[test]
    fn defaults_skip_unset_options_when_serialized() {
        let value = serde_json::to_value(GenerationDefaults::default()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("function_call"));
        assert!(!obj.contains_key("functions"));
        assert!(!obj.contains_key("stop"));
        assert_eq!(obj["max_tokens"], json!(1024));
    }

    #[test]
    fn normalization_preserves_order_and_drops_metadata() {
        let models = vec![descriptor("llama2"), descriptor("ollama:mistral")];
        let configs = normalize_models(&models);
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].id, "ollama:llama2");
        assert_eq!(configs[1].id, "ollama:mistral");
        assert_eq!(configs[0].config, GenerationDefaults::default());
        assert_eq!(configs[1].config, GenerationDefaults::default());
    }

    #[test]
    fn descriptor_decodes_with_only_a_name() {
        let descriptor: ModelDescriptor =
            serde_json::from_value(json!({ "name": "phi3" })).unwrap();
        assert_eq!(descriptor.name, "phi3");
        assert_eq!(descriptor.size, 0);
        assert_eq!(descriptor.details, ModelDetails::default());
    }

    #[test]
    fn descriptor_decodes_null_families() {
        let descriptor: ModelDescriptor = serde_json::from_value(json!({
            "name": "phi3",
            "details": {
                "parent_model": "",
                "format": "gguf",
                "family": "phi",
                "families": null,
                "parameter_size": "3B",
                "quantization_level": "Q4_K_M"
            }
        }))
        .unwrap();
        assert!(descriptor.details.families.is_none());
    }
}
