//! Per-scenario sampling knobs and completion outcomes.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::HandoffError;

/// Sampling settings sent with every completion request an agent makes.
///
/// Scenarios may set these under a `[generation]` table; anything left out
/// is omitted from the request so the endpoint's defaults apply.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GenerationSettings {
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub top_p: Option<f64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GenerationSettings {
    pub fn validate(&self) -> Result<(), HandoffError> {
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(HandoffError::InvalidArgument(format!(
                    "temperature {t} outside 0.0..=2.0"
                )));
            }
        }
        if let Some(p) = self.top_p {
            if !(p > 0.0 && p <= 1.0) {
                return Err(HandoffError::InvalidArgument(format!(
                    "top_p {p} outside (0.0, 1.0]"
                )));
            }
        }
        if self.max_tokens == Some(0) {
            return Err(HandoffError::InvalidArgument(
                "max_tokens must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Why the model stopped producing output for one completion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
}

impl FinishReason {
    /// Map the `finish_reason` string of a chat completion choice.
    /// Unrecognised values (for example `function_call`) yield `None`.
    pub fn from_wire(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}
