//! MCP (Model Context Protocol) client over stdio.
//!
//! Each capability an agent holds is served by a separate tool server
//! process. [`endpoints`] knows how to launch the standard servers,
//! [`client`] speaks the protocol, and [`bridge`] exposes a connected
//! client as a [`crate::tools::ToolEndpoint`].

pub mod bridge;
pub mod client;
pub mod endpoints;
pub mod schema;
pub mod transport;

pub use bridge::MCPToolEndpoint;
pub use client::{MCPClient, MCPConnectionState, MCPToolCallResult};
pub use endpoints::{ensure_command, ToolEndpointSpec};
pub use schema::MCPToolSchema;
pub use transport::{MCPTransport, StdioTransport};
