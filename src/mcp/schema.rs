//! Tool descriptions as reported by an MCP server.

use serde::{Deserialize, Serialize};

use crate::tools::{AgentToolParameters, DiscoveredTool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MCPToolSchema {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: serde_json::Value,
}

impl MCPToolSchema {
    /// Convert for tool discovery. A missing description falls back to the tool name.
    pub fn into_discovered(self) -> DiscoveredTool {
        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| self.name.clone());
        DiscoveredTool {
            name: self.name,
            description,
            parameters: AgentToolParameters::from_schema(self.input_schema),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_description_uses_name() {
        let tool = MCPToolSchema {
            name: "list_tables".into(),
            description: Some("  ".into()),
            input_schema: json!({"type": "object"}),
        }
        .into_discovered();
        assert_eq!(tool.description, "list_tables");
        assert_eq!(tool.parameters.schema["properties"], json!({}));
    }
}
