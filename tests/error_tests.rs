//! Error classification, exit codes and hints.

use handoff::error::{ErrorCategory, HandoffError, RecoverySuggestion};

#[test]
fn startup_errors_are_classified() {
    let missing = HandoffError::missing_command("npx", "Install Node.js");
    assert_eq!(missing.category(), ErrorCategory::MissingPrerequisite);
    assert_eq!(missing.exit_code(), 3);
    assert!(missing.is_startup_error());
    assert_eq!(
        missing.to_string(),
        "Required command 'npx' was not found on PATH. Install Node.js"
    );

    let auth = HandoffError::Authentication("OPENAI_API_KEY not found".into());
    assert_eq!(auth.exit_code(), 4);
    assert_eq!(auth.recovery_suggestion(), RecoverySuggestion::CheckCredentials);

    let config = HandoffError::Configuration("unknown scenario 'x'".into());
    assert_eq!(config.exit_code(), 2);
    assert!(config.is_startup_error());
}

#[test]
fn runtime_errors_are_not_startup_errors() {
    let tool = HandoffError::ToolExecution {
        tool_name: "execute_sql".into(),
        message: "Access denied".into(),
    };
    assert_eq!(tool.category(), ErrorCategory::ToolEndpoint);
    assert!(!tool.is_startup_error());
    assert_eq!(tool.recovery_suggestion(), RecoverySuggestion::CheckToolServer);

    let timeout = HandoffError::Timeout(30_000);
    assert_eq!(timeout.to_string(), "Timeout after 30000ms");
    assert_eq!(timeout.category(), ErrorCategory::ToolEndpoint);

    let mcp = HandoffError::Provider {
        provider: "mcp".into(),
        message: "connection closed".into(),
    };
    assert_eq!(mcp.category(), ErrorCategory::ToolEndpoint);

    let provisioning = HandoffError::Provisioning {
        step: "readiness".into(),
        message: "not ready".into(),
    };
    assert_eq!(provisioning.exit_code(), 5);
}

#[test]
fn api_status_decides_category() {
    assert_eq!(
        HandoffError::api(403, "forbidden").category(),
        ErrorCategory::MissingCredential
    );
    assert_eq!(
        HandoffError::api(429, "rate limited").category(),
        ErrorCategory::Inference
    );
}

#[test]
fn agent_wrapper_keeps_inner_category() {
    let err = HandoffError::Timeout(60_000).in_agent("ExcelAgent");
    assert_eq!(err.category(), ErrorCategory::ToolEndpoint);
    assert_eq!(
        err.to_string(),
        "Agent 'ExcelAgent' failed: Timeout after 60000ms"
    );
    let source = std::error::Error::source(&err).map(|s| s.to_string());
    assert_eq!(source.as_deref(), Some("Timeout after 60000ms"));
}

#[test]
fn every_suggestion_has_a_hint() {
    for suggestion in [
        RecoverySuggestion::InstallPrerequisite,
        RecoverySuggestion::CheckCredentials,
        RecoverySuggestion::CheckConfiguration,
        RecoverySuggestion::CheckToolServer,
        RecoverySuggestion::RerunScenario,
        RecoverySuggestion::CheckContainerRuntime,
        RecoverySuggestion::ReportBug,
    ] {
        assert!(!suggestion.hint().is_empty());
    }
}
