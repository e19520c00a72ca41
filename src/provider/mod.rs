//! Inference endpoint abstraction and the Chat Completions implementation.

pub mod http;
pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::HarnessConfig;
use crate::error::HandoffError;
use crate::models::{InferenceProvider, LanguageModel};
use crate::types::{AgentToolCall, FinishReason, GenerationSettings, ModelMessage, Usage};

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Response from a provider.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<AgentToolCall>,
    pub finish_reason: Option<FinishReason>,
}

/// An inference endpoint: transcript in, next assistant message out.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate one assistant message (non-streaming).
    async fn generate_text(&self, request: &ProviderRequest)
        -> Result<ProviderResponse, HandoffError>;
}

/// Create a provider for the given model, using the provided config.
///
/// Fails with [`HandoffError::Authentication`] when no API key is configured,
/// which the binary treats as a fatal startup error.
pub fn create_provider(
    model: &LanguageModel,
    config: &HarnessConfig,
) -> Result<Arc<dyn ModelProvider>, HandoffError> {
    match model.provider {
        InferenceProvider::OpenAi => {
            let api_key = config.require_api_key("openai")?;
            Ok(Arc::new(openai::OpenAiProvider::new(
                model.model_id(),
                api_key,
                config.openai_base_url_for(model.model_id()),
            )))
        }
        InferenceProvider::OpenAiCompatible => {
            let api_key = config
                .api_key("openai-compatible")
                .map(Ok)
                .unwrap_or_else(|| config.require_api_key("openai"))?;
            let base_url = config
                .base_url("openai-compatible")
                .or_else(|| config.base_url("openai"))
                .ok_or_else(|| {
                    HandoffError::Configuration("Missing OPENAI_COMPAT_BASE_URL".into())
                })?;
            Ok(Arc::new(
                openai::OpenAiProvider::new(model.model_id(), api_key, Some(base_url))
                    .with_provider_name("openai-compatible"),
            ))
        }
    }
}
