//! Model identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::error::HandoffError;

/// Wire protocol family of an inference endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InferenceProvider {
    /// OpenAI Chat Completions, optionally at an overridden base URL.
    #[strum(serialize = "openai")]
    #[serde(rename = "openai")]
    OpenAi,
    /// Any server implementing the Chat Completions API; requires a base URL.
    #[strum(serialize = "openai-compatible")]
    #[serde(rename = "openai-compatible")]
    OpenAiCompatible,
}

/// A model on a particular inference endpoint, written `provider:model`.
///
/// A bare model id (no `provider:` prefix) is served through the OpenAI
/// provider, which is how Gemini's OpenAI-compatible endpoint is reached
/// when `OPENAI_BASE_URL` points at it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LanguageModel {
    pub provider: InferenceProvider,
    pub model_id: String,
}

impl LanguageModel {
    pub fn new(provider: InferenceProvider, model_id: impl Into<String>) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl FromStr for LanguageModel {
    type Err = HandoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(HandoffError::InvalidArgument("Empty model identifier".into()));
        }
        match s.split_once(':') {
            Some((provider, model_id)) => {
                let provider = provider.parse::<InferenceProvider>().map_err(|_| {
                    HandoffError::InvalidArgument(format!(
                        "Unknown inference provider '{provider}' in '{s}'"
                    ))
                })?;
                if model_id.is_empty() {
                    return Err(HandoffError::InvalidArgument(format!(
                        "Missing model id in '{s}'"
                    )));
                }
                Ok(Self::new(provider, model_id))
            }
            None => Ok(Self::new(InferenceProvider::OpenAi, s)),
        }
    }
}

impl fmt::Display for LanguageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.model_id)
    }
}
