//! Error types for handoff.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all handoff operations.
#[derive(Error, Debug)]
pub enum HandoffError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Required command '{command}' was not found on PATH. {hint}")]
    MissingCommand { command: String, hint: String },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Scenario parse error: {0}")]
    ScenarioParse(#[from] toml::de::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Provider error: {provider}: {message}")]
    Provider { provider: String, message: String },

    #[error("Agent '{agent}' failed: {source}")]
    Agent {
        agent: String,
        #[source]
        source: Box<HandoffError>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Provisioning failed at '{step}': {message}")]
    Provisioning { step: String, message: String },
}

impl HandoffError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a missing-command error with an install hint.
    pub fn missing_command(command: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingCommand {
            command: command.into(),
            hint: hint.into(),
        }
    }

    /// Attribute an error to the agent whose turn produced it.
    pub fn in_agent(self, agent: impl Into<String>) -> Self {
        Self::Agent {
            agent: agent.into(),
            source: Box::new(self),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingCommand { .. } => ErrorCategory::MissingPrerequisite,
            Self::Authentication(_) => ErrorCategory::MissingCredential,
            Self::Configuration(_) | Self::ScenarioParse(_) | Self::InvalidArgument(_) => {
                ErrorCategory::Configuration
            }
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::MissingCredential,
                _ => ErrorCategory::Inference,
            },
            Self::Provider { provider, .. } if provider == "mcp" => ErrorCategory::ToolEndpoint,
            Self::Network(_) | Self::Provider { .. } => ErrorCategory::Inference,
            Self::Timeout(_) | Self::Stream(_) | Self::ToolExecution { .. } => {
                ErrorCategory::ToolEndpoint
            }
            Self::Agent { source, .. } => source.category(),
            Self::Provisioning { .. } => ErrorCategory::Provisioning,
            Self::Io(_) | Self::Serialization(_) | Self::InvalidState(_) => ErrorCategory::Internal,
        }
    }

    /// Errors in these categories are raised before any agent runs.
    pub fn is_startup_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::MissingPrerequisite
                | ErrorCategory::MissingCredential
                | ErrorCategory::Configuration
        )
    }

    /// Process exit code for the binary.
    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::MissingPrerequisite => RecoverySuggestion::InstallPrerequisite,
            ErrorCategory::MissingCredential => RecoverySuggestion::CheckCredentials,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::ToolEndpoint => RecoverySuggestion::CheckToolServer,
            ErrorCategory::Inference => RecoverySuggestion::RerunScenario,
            ErrorCategory::Provisioning => RecoverySuggestion::CheckContainerRuntime,
            ErrorCategory::Internal => RecoverySuggestion::ReportBug,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, HandoffError>;
