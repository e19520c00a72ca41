//! Configuration resolution and provider construction.

use std::collections::HashMap;

use handoff::config::{HarnessConfig, DEFAULT_MODEL, GEMINI_OPENAI_BASE_URL};
use handoff::error::HandoffError;
use handoff::models::{InferenceProvider, LanguageModel};
use handoff::provider::create_provider;

fn config(pairs: &[(&str, &str)]) -> HarnessConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    HarnessConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

#[test]
fn default_model_uses_openai_wire_protocol() {
    let model: LanguageModel = DEFAULT_MODEL.parse().unwrap();
    assert_eq!(model.provider, InferenceProvider::OpenAi);
    assert_eq!(model.model_id(), DEFAULT_MODEL);
}

#[test]
fn base_url_override_reaches_provider() {
    let config = config(&[
        ("OPENAI_API_KEY", "sk-test"),
        (
            "OPENAI_BASE_URL",
            "https://generativelanguage.googleapis.com/v1beta/openai/",
        ),
    ]);
    let model: LanguageModel = "gemini-2.5-flash".parse().unwrap();
    let provider = create_provider(&model, &config).unwrap();
    assert_eq!(provider.provider_name(), "openai");
    assert_eq!(provider.model_id(), "gemini-2.5-flash");
}

#[test]
fn missing_key_is_fatal_at_startup() {
    let model: LanguageModel = "gpt-4o".parse().unwrap();
    let err = match create_provider(&model, &config(&[])) {
        Ok(_) => panic!("missing key must fail"),
        Err(err) => err,
    };
    assert!(matches!(err, HandoffError::Authentication(_)));
    assert!(err.is_startup_error());
}

#[test]
fn unknown_provider_prefix_is_rejected() {
    let err = "anthropic:claude".parse::<LanguageModel>().unwrap_err();
    assert!(matches!(err, HandoffError::InvalidArgument(_)));
}

#[test]
fn resources_dir_comes_from_environment() {
    let config = config(&[("HANDOFF_RESOURCES_DIR", "/srv/qa")]);
    assert_eq!(config.resources_dir(), std::path::PathBuf::from("/srv/qa"));
}

#[test]
fn explicit_setters_win_over_environment() {
    let mut config = config(&[("HANDOFF_MODEL", "gpt-4o-mini")]);
    config.set_model("gemini-2.5-pro");
    assert_eq!(config.model_override(), Some("gemini-2.5-pro"));
}

#[test]
fn default_model_resolves_to_gemini_endpoint() {
    let config = config(&[("OPENAI_API_KEY", "sk-test")]);
    assert_eq!(
        config.openai_base_url_for(DEFAULT_MODEL).as_deref(),
        Some(GEMINI_OPENAI_BASE_URL)
    );
    assert_eq!(config.openai_base_url_for("gpt-4o"), None);
}

#[test]
fn explicit_base_url_wins_for_gemini_models() {
    let config = config(&[("OPENAI_BASE_URL", "http://localhost:8080/v1")]);
    assert_eq!(
        config.openai_base_url_for("gemini-2.5-pro").as_deref(),
        Some("http://localhost:8080/v1")
    );
}

#[test]
fn non_numeric_turn_budget_is_a_configuration_error() {
    let err = HarnessConfig::from_lookup(|key| {
        (key == "HANDOFF_MAX_TURNS").then(|| "abc".to_string())
    })
    .unwrap_err();
    assert!(matches!(&err, HandoffError::Configuration(msg) if msg.contains("HANDOFF_MAX_TURNS")));
    assert_eq!(err.exit_code(), 2);
}
