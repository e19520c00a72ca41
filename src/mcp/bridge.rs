//! Bridge MCP tools into the handoff tool system.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::client::{MCPClient, MCPToolCallResult};
use super::schema::MCPToolSchema;
use crate::error::HandoffError;
use crate::tools::{DiscoveredTool, ToolArguments, ToolEndpoint};
use crate::util::with_timeout;

#[async_trait]
trait MCPClientOps: Send {
    async fn initialize(&mut self) -> Result<(), HandoffError>;
    async fn list_tools(&mut self) -> Result<Vec<MCPToolSchema>, HandoffError>;
    async fn call_tool(
        &mut self,
        name: &str,
        arguments: &ToolArguments,
    ) -> Result<MCPToolCallResult, HandoffError>;
    async fn close(&mut self) -> Result<(), HandoffError>;
}

#[async_trait]
impl MCPClientOps for MCPClient {
    async fn initialize(&mut self) -> Result<(), HandoffError> {
        MCPClient::initialize(self).await
    }

    async fn list_tools(&mut self) -> Result<Vec<MCPToolSchema>, HandoffError> {
        MCPClient::list_tools(self).await
    }

    async fn call_tool(
        &mut self,
        name: &str,
        arguments: &ToolArguments,
    ) -> Result<MCPToolCallResult, HandoffError> {
        MCPClient::call_tool(self, name, arguments).await
    }

    async fn close(&mut self) -> Result<(), HandoffError> {
        MCPClient::close(self).await
    }
}

/// A named MCP server exposed as a [`ToolEndpoint`].
///
/// Every request is bounded by the endpoint's read timeout.
pub struct MCPToolEndpoint {
    name: String,
    read_timeout: Duration,
    client: Mutex<Box<dyn MCPClientOps>>,
}

impl MCPToolEndpoint {
    pub fn new(name: impl Into<String>, client: MCPClient, read_timeout: Duration) -> Self {
        Self {
            name: name.into(),
            read_timeout,
            client: Mutex::new(Box::new(client)),
        }
    }

    #[cfg(test)]
    fn from_client_ops(name: &str, client: Box<dyn MCPClientOps>, read_timeout: Duration) -> Self {
        Self {
            name: name.to_string(),
            read_timeout,
            client: Mutex::new(client),
        }
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Launch the server and complete the handshake.
    pub async fn connect(&self) -> Result<(), HandoffError> {
        let mut client = self.client.lock().await;
        with_timeout(self.read_timeout, client.initialize()).await
    }
}

#[async_trait]
impl ToolEndpoint for MCPToolEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_tools(&self) -> Result<Vec<DiscoveredTool>, HandoffError> {
        let mut client = self.client.lock().await;
        with_timeout(self.read_timeout, client.initialize()).await?;
        let tools = with_timeout(self.read_timeout, client.list_tools()).await?;
        debug!(endpoint = %self.name, count = tools.len(), "discovered MCP tools");
        Ok(tools.into_iter().map(MCPToolSchema::into_discovered).collect())
    }

    async fn invoke(
        &self,
        tool: &str,
        args: &ToolArguments,
    ) -> Result<serde_json::Value, HandoffError> {
        let mut client = self.client.lock().await;
        with_timeout(self.read_timeout, client.initialize()).await?;
        debug!(endpoint = %self.name, tool, "invoking MCP tool");
        let result = with_timeout(self.read_timeout, client.call_tool(tool, args))
            .await
            .map_err(|error| {
                warn!(endpoint = %self.name, tool, %error, "MCP tool call failed");
                error
            })?;
        Ok(result.into_value_or_text())
    }

    async fn shutdown(&self) -> Result<(), HandoffError> {
        self.client.lock().await.close().await
    }
}
