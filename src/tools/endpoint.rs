//! Tool endpoints: external processes that expose a set of named tools.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::arguments::ToolArguments;
use super::tool::Tool;
use super::types::AgentToolParameters;
use crate::error::HandoffError;

/// A tool as advertised by an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredTool {
    pub name: String,
    pub description: String,
    pub parameters: AgentToolParameters,
}

/// Something that can list tools and invoke them by name.
///
/// Implemented by the MCP stdio bridge; tests substitute in-process fakes.
#[async_trait]
pub trait ToolEndpoint: Send + Sync {
    /// Endpoint label used in logs and error messages.
    fn name(&self) -> &str;

    /// Discover the tools this endpoint currently offers.
    async fn list_tools(&self) -> Result<Vec<DiscoveredTool>, HandoffError>;

    /// Invoke a tool and return its result payload.
    async fn invoke(
        &self,
        tool: &str,
        args: &ToolArguments,
    ) -> Result<serde_json::Value, HandoffError>;

    /// Release the underlying process or session. Idempotent.
    async fn shutdown(&self) -> Result<(), HandoffError> {
        Ok(())
    }
}

/// Adapts one discovered tool to the [`Tool`] trait.
pub struct EndpointTool {
    endpoint: Arc<dyn ToolEndpoint>,
    tool: DiscoveredTool,
}

impl EndpointTool {
    pub fn new(endpoint: Arc<dyn ToolEndpoint>, tool: DiscoveredTool) -> Self {
        Self { endpoint, tool }
    }

    pub fn endpoint_name(&self) -> &str {
        self.endpoint.name()
    }
}

#[async_trait]
impl Tool for EndpointTool {
    fn name(&self) -> &str {
        &self.tool.name
    }

    fn description(&self) -> &str {
        &self.tool.description
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.tool.parameters
    }

    async fn execute(&self, args: &ToolArguments) -> Result<serde_json::Value, HandoffError> {
        self.endpoint.invoke(&self.tool.name, args).await
    }
}

/// List every endpoint's tools and wrap them for an agent.
///
/// Two endpoints advertising the same tool name is a configuration error:
/// the model would have no way to address either one unambiguously.
pub async fn discover_tools(
    endpoints: &[Arc<dyn ToolEndpoint>],
) -> Result<Vec<Arc<dyn Tool>>, HandoffError> {
    let mut owners: HashMap<String, String> = HashMap::new();
    let mut tools: Vec<Arc<dyn Tool>> = Vec::new();

    for endpoint in endpoints {
        for tool in endpoint.list_tools().await? {
            if let Some(previous) = owners.insert(tool.name.clone(), endpoint.name().to_string()) {
                return Err(HandoffError::Configuration(format!(
                    "tool '{}' is offered by both '{previous}' and '{}'",
                    tool.name,
                    endpoint.name()
                )));
            }
            tools.push(Arc::new(EndpointTool::new(Arc::clone(endpoint), tool)));
        }
    }

    Ok(tools)
}
