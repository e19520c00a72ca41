//! Command-line interface for the `handoff` binary.

pub mod commands;
pub mod console;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Drive LLM agent teams through scripted hand-off scenarios.
#[derive(Parser, Debug)]
#[command(name = "handoff", version, about = "Run multi-agent hand-off scenarios against MCP tool servers")]
pub struct Cli {
    /// Directory holding request collections, seed data and reports
    #[arg(long, global = true)]
    pub resources_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a scenario to completion
    Run(RunArgs),
    /// List built-in and user scenarios
    Scenarios,
    /// Verify credentials and tool server prerequisites without running
    Check(CheckArgs),
    /// Recreate the local MySQL container and load the seed data
    Provision,
}

/// Arguments for `handoff run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Scenario name (built-in or user) or path to a scenario TOML file
    pub scenario: String,

    /// Override the scenario's turn budget
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Model to use (format: [provider:]model, e.g. gemini-2.5-flash)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Replace the scenario's initial task message
    #[arg(short, long)]
    pub task: Option<String>,

    /// Exit non-zero when the run ends before its workflow completes
    #[arg(long)]
    pub require_complete: bool,
}

/// Arguments for `handoff check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Scenario name or path
    pub scenario: String,
}
