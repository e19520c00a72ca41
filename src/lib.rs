//! handoff: scripted hand-offs between LLM agents.
//!
//! A scenario names a team of agents, each bound to a chat-completions model
//! and to zero or more MCP tool servers (database, REST, filesystem,
//! spreadsheet). The agents take turns in a fixed round-robin order over a
//! shared transcript until one of them emits the scenario's termination
//! marker or the turn budget runs out.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use handoff::prelude::*;
//!
//! # async fn example() -> handoff::error::Result<()> {
//! let config = HarnessConfig::from_env()?;
//! let scenario = ScenarioCatalog::builtin_only().load("chaos")?;
//! let model: LanguageModel = "gemini-2.5-flash".parse()?;
//! let provider = handoff::provider::create_provider(&model, &config)?;
//!
//! let factory = AgentFactory::new(provider, Arc::new(McpConnector::new(config)?));
//! let members = factory.create_team(&scenario.agents).await?;
//! let team = RoundRobinTeam::new(members, Box::new(scenario.termination()), scenario.max_turns)?;
//! let result = team.run(&scenario.task).await?;
//! println!("{} messages, stopped: {}", result.transcript.len(), result.stop_reason);
//! factory.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod generation;
pub mod mcp;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod provision;
pub mod scenario;
pub mod team;
pub mod tools;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
