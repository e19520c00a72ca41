//! Convenient re-exports for common usage.

pub use crate::agent::{Agent, AgentDescriptor, AgentFactory, Capability, McpConnector, StandardRole};
pub use crate::config::HarnessConfig;
pub use crate::error::{HandoffError, Result};
pub use crate::models::LanguageModel;
pub use crate::provider::ModelProvider;
pub use crate::scenario::{ScenarioCatalog, ScenarioConfig};
pub use crate::team::{
    Participant, RoundRobinTeam, StopReason, TeamEvent, TeamRunResult, TerminationCondition,
    TextMention, Transcript, TranscriptMessage, Workflow, WorkflowStatus,
};
pub use crate::tools::{Tool, ToolArguments, ToolEndpoint};
pub use crate::types::*;
