//! MCP client for connecting to tool servers.

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, JsonObject, ProtocolVersion, ResourceContents,
};
use rmcp::service::{ClientInitializeError, ServiceError};
use tracing::debug;

use super::schema::MCPToolSchema;
use super::transport::{MCPRunningService, MCPTransport};
use crate::error::HandoffError;
use crate::tools::ToolArguments;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MCPConnectionState {
    Disconnected,
    Initialized,
    Closed,
}

#[derive(Debug, Clone)]
pub struct MCPToolCallResult {
    pub structured_content: Option<serde_json::Value>,
    pub text_content: Option<String>,
    pub content: Vec<serde_json::Value>,
}

impl MCPToolCallResult {
    /// Prefer structured output, then joined text, then the raw content list.
    pub fn into_value_or_text(self) -> serde_json::Value {
        if let Some(structured) = self.structured_content {
            return structured;
        }
        if let Some(text) = self.text_content {
            return serde_json::Value::String(text);
        }
        serde_json::Value::Array(self.content)
    }
}

/// Client for a single MCP server session.
pub struct MCPClient {
    transport: Box<dyn MCPTransport>,
    session: Option<MCPRunningService>,
    state: MCPConnectionState,
}

impl MCPClient {
    pub fn new(transport: Box<dyn MCPTransport>) -> Self {
        Self {
            transport,
            session: None,
            state: MCPConnectionState::Disconnected,
        }
    }

    pub fn connection_state(&self) -> MCPConnectionState {
        self.state
    }

    /// Start the server (if needed) and complete the initialize handshake.
    pub async fn initialize(&mut self) -> Result<(), HandoffError> {
        match self.state {
            MCPConnectionState::Initialized => return Ok(()),
            MCPConnectionState::Closed => {
                return Err(HandoffError::Stream("MCP session is closed".into()))
            }
            MCPConnectionState::Disconnected => {}
        }

        let session = self.connect_with_protocol_fallback().await?;
        self.session = Some(session);
        self.state = MCPConnectionState::Initialized;
        Ok(())
    }

    /// List available tools from the MCP server.
    pub async fn list_tools(&mut self) -> Result<Vec<MCPToolSchema>, HandoffError> {
        let session = self.active_session()?;
        let tools = match session.list_all_tools().await {
            Ok(tools) => tools,
            Err(ServiceError::UnexpectedResponse) => session
                .list_tools(None)
                .await
                .map(|page| page.tools)
                .map_err(|error| map_service_error("list_tools", error))?,
            Err(error) => return Err(map_service_error("list_tools", error)),
        };
        Ok(tools.into_iter().map(map_mcp_tool_schema).collect())
    }

    /// Execute a tool on the MCP server.
    pub async fn call_tool(
        &mut self,
        name: &str,
        arguments: &ToolArguments,
    ) -> Result<MCPToolCallResult, HandoffError> {
        let arguments: Option<JsonObject> = arguments.to_object()?;
        let session = self.active_session()?;
        let result = session
            .call_tool(CallToolRequestParams {
                meta: None,
                name: name.to_owned().into(),
                arguments,
                task: None,
            })
            .await
            .map_err(|error| map_service_error("call_tool", error))?;
        map_call_result(name, result)
    }

    /// Cancel the session, which stops the server process.
    pub async fn close(&mut self) -> Result<(), HandoffError> {
        self.state = MCPConnectionState::Closed;
        if let Some(session) = self.session.take() {
            session
                .cancel()
                .await
                .map_err(|error| HandoffError::Stream(format!("MCP shutdown failed: {error}")))?;
        }
        Ok(())
    }

    fn active_session(&self) -> Result<&MCPRunningService, HandoffError> {
        match (self.state, self.session.as_ref()) {
            (MCPConnectionState::Initialized, Some(session)) => Ok(session),
            (MCPConnectionState::Closed, _) => {
                Err(HandoffError::Stream("MCP session is closed".into()))
            }
            _ => Err(HandoffError::InvalidState(
                "MCP client must be initialized first".into(),
            )),
        }
    }

    async fn connect_with_protocol_fallback(&mut self) -> Result<MCPRunningService, HandoffError> {
        let latest = rmcp::model::ClientInfo {
            protocol_version: ProtocolVersion::LATEST,
            ..Default::default()
        };

        match self.transport.connect(latest).await {
            Ok(session) => return Ok(session),
            Err(error) if should_retry_protocol_fallback(&error) => {
                debug!("MCP server rejected latest protocol version, retrying with 2024-11-05");
            }
            Err(error) => return Err(map_client_initialize_error(error)),
        }

        let fallback = rmcp::model::ClientInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            ..Default::default()
        };
        self.transport
            .connect(fallback)
            .await
            .map_err(map_client_initialize_error)
    }
}

fn should_retry_protocol_fallback(error: &ClientInitializeError) -> bool {
    match error {
        ClientInitializeError::JsonRpcError(error) => {
            let message = error.message.to_ascii_lowercase();
            message.contains("protocol") && message.contains("version")
        }
        _ => false,
    }
}

fn map_mcp_tool_schema(tool: rmcp::model::Tool) -> MCPToolSchema {
    MCPToolSchema {
        name: tool.name.to_string(),
        description: tool.description.map(|d| d.to_string()),
        input_schema: serde_json::Value::Object((*tool.input_schema).clone()),
    }
}

fn extract_text_content(content: &[Content]) -> Option<String> {
    let lines: Vec<String> = content
        .iter()
        .filter_map(|item| {
            if let Some(text) = item.as_text() {
                return Some(text.text.clone());
            }
            match item.as_resource().map(|r| &r.resource) {
                Some(ResourceContents::TextResourceContents { text, .. }) => Some(text.clone()),
                _ => None,
            }
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn map_call_result(name: &str, result: CallToolResult) -> Result<MCPToolCallResult, HandoffError> {
    let text_content = extract_text_content(&result.content);
    let content = result
        .content
        .iter()
        .filter_map(|item| serde_json::to_value(item).ok())
        .collect::<Vec<_>>();

    if result.is_error.unwrap_or(false) {
        let message = result
            .structured_content
            .as_ref()
            .map(|v| v.to_string())
            .or_else(|| text_content.clone())
            .unwrap_or_else(|| "MCP tool returned an error result".into());

        return Err(HandoffError::ToolExecution {
            tool_name: name.to_string(),
            message,
        });
    }

    Ok(MCPToolCallResult {
        structured_content: result.structured_content,
        text_content,
        content,
    })
}

fn map_client_initialize_error(error: ClientInitializeError) -> HandoffError {
    match error {
        ClientInitializeError::ConnectionClosed(context) => {
            HandoffError::Stream(format!("MCP initialize connection closed: {context}"))
        }
        ClientInitializeError::TransportError { error, context } => HandoffError::Stream(
            format!("MCP initialize transport error ({context}): {error}"),
        ),
        ClientInitializeError::JsonRpcError(error) => HandoffError::Provider {
            provider: "mcp".into(),
            message: format!(
                "MCP initialize JSON-RPC error {}: {}",
                error.code.0, error.message
            ),
        },
        ClientInitializeError::Cancelled => HandoffError::Stream("MCP initialize cancelled".into()),
        other => HandoffError::Provider {
            provider: "mcp".into(),
            message: format!("MCP initialize error: {other}"),
        },
    }
}

fn map_service_error(context: &str, error: ServiceError) -> HandoffError {
    match error {
        ServiceError::McpError(error) => HandoffError::Provider {
            provider: "mcp".into(),
            message: format!("{context}: MCP error {}: {}", error.code.0, error.message),
        },
        ServiceError::TransportSend(error) => {
            HandoffError::Stream(format!("{context}: MCP transport send failed: {error}"))
        }
        ServiceError::TransportClosed => {
            HandoffError::Stream(format!("{context}: MCP transport closed"))
        }
        ServiceError::UnexpectedResponse => HandoffError::Provider {
            provider: "mcp".into(),
            message: format!("{context}: unexpected MCP response"),
        },
        ServiceError::Cancelled { reason } => {
            let suffix = reason
                .as_deref()
                .map(|r| format!(" ({r})"))
                .unwrap_or_default();
            HandoffError::Stream(format!("{context}: MCP request cancelled{suffix}"))
        }
        ServiceError::Timeout { timeout } => HandoffError::Timeout(timeout.as_millis() as u64),
        other => HandoffError::Provider {
            provider: "mcp".into(),
            message: format!("{context}: MCP service error: {other}"),
        },
    }
}
