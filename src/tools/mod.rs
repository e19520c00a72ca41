//! Tool system for function calling.

pub mod arguments;
pub mod endpoint;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use endpoint::{discover_tools, DiscoveredTool, EndpointTool, ToolEndpoint};
pub use tool::Tool;
pub use types::AgentToolParameters;
