//! Typed access to tool call arguments.

use crate::error::HandoffError;

/// Wrapper around tool call arguments as the model produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    pub fn new(value: serde_json::Value) -> Self {
        Self { value }
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, HandoffError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| HandoffError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    /// Normalize into a JSON object, the shape MCP `tools/call` expects.
    ///
    /// Models sometimes send arguments as a JSON-encoded string; that is
    /// unwrapped. `null` and empty strings become `None`.
    pub fn to_object(&self) -> Result<Option<serde_json::Map<String, serde_json::Value>>, HandoffError> {
        coerce_object(self.value.clone())
    }
}

fn coerce_object(
    value: serde_json::Value,
) -> Result<Option<serde_json::Map<String, serde_json::Value>>, HandoffError> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(map) => Ok(Some(map)),
        serde_json::Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            let parsed: serde_json::Value = serde_json::from_str(trimmed).map_err(|e| {
                HandoffError::InvalidArgument(format!("Tool arguments must be valid JSON: {e}"))
            })?;
            coerce_object(parsed)
        }
        other => Err(HandoffError::InvalidArgument(format!(
            "Tool arguments must be a JSON object; got {other}"
        ))),
    }
}
