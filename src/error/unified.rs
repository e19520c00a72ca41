//! Error classification and recovery hints.

use strum::Display;

/// Broad error category, mirroring where in a run the failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    /// A command required to launch a tool endpoint is not on PATH.
    MissingPrerequisite,
    /// The inference API key is absent or rejected.
    MissingCredential,
    /// Scenario or environment configuration is invalid.
    Configuration,
    /// A tool endpoint call failed, timed out, or its process went away.
    ToolEndpoint,
    /// The inference endpoint returned an error or was unreachable.
    Inference,
    /// Database container setup failed.
    Provisioning,
    Internal,
}

impl ErrorCategory {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::MissingPrerequisite => 3,
            Self::MissingCredential => 4,
            Self::Configuration => 2,
            Self::ToolEndpoint | Self::Inference => 1,
            Self::Provisioning => 5,
            Self::Internal => 70,
        }
    }
}

/// Suggested recovery action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoverySuggestion {
    InstallPrerequisite,
    CheckCredentials,
    CheckConfiguration,
    CheckToolServer,
    RerunScenario,
    CheckContainerRuntime,
    ReportBug,
}

impl RecoverySuggestion {
    /// One-line hint printed under a fatal error.
    pub fn hint(self) -> &'static str {
        match self {
            Self::InstallPrerequisite => "install the missing command, then run `handoff check <scenario>`",
            Self::CheckCredentials => "set OPENAI_API_KEY (and OPENAI_BASE_URL for non-OpenAI endpoints)",
            Self::CheckConfiguration => "check the scenario file and HANDOFF_* environment variables",
            Self::CheckToolServer => "check that the tool server can start and reach its backend (try `handoff provision`)",
            Self::RerunScenario => "the inference endpoint failed; rerun the scenario",
            Self::CheckContainerRuntime => "check that docker is installed and the daemon is running",
            Self::ReportBug => "this looks like a bug; rerun with RUST_LOG=handoff=debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_categories_have_distinct_exit_codes() {
        let codes = [
            ErrorCategory::MissingPrerequisite.exit_code(),
            ErrorCategory::MissingCredential.exit_code(),
            ErrorCategory::Configuration.exit_code(),
            ErrorCategory::Provisioning.exit_code(),
        ];
        for (i, code) in codes.iter().enumerate() {
            assert_ne!(*code, 0);
            assert!(!codes[i + 1..].contains(code));
        }
    }

    #[test]
    fn category_display_is_snake_case() {
        assert_eq!(ErrorCategory::ToolEndpoint.to_string(), "tool_endpoint");
    }
}
