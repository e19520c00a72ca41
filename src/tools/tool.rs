//! The model-facing side of a tool.

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::types::AgentToolParameters;
use crate::error::HandoffError;
use crate::provider::ToolDefinition;

/// Something an agent can offer the model during its turn.
///
/// In practice every implementation forwards to a tool server; see
/// [`EndpointTool`](super::EndpointTool).
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model calls; unique within one agent.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameters(&self) -> &AgentToolParameters;

    /// Run one call. The returned value is serialized into the tool result
    /// message the model sees next.
    async fn execute(&self, args: &ToolArguments) -> Result<serde_json::Value, HandoffError>;

    /// Advertised form of this tool in a completion request.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters().schema.clone(),
        }
    }
}
