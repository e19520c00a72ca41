//! Agents: named roles bound to a model and a set of tool endpoints.

pub mod agent;
pub mod descriptor;
pub mod factory;

pub use agent::Agent;
pub use descriptor::{AgentDescriptor, Capability, StandardRole};
pub use factory::{AgentFactory, EndpointConnector, McpConnector};
