//! Harness configuration (layered: explicit setters > env > `.env` file > defaults).

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::HandoffError;

/// Model used when neither the scenario nor the environment picks one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// OpenAI-compatible endpoint used for `gemini-*` models when no base URL is set.
pub const GEMINI_OPENAI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Connection parameters handed to the database tool endpoint.
///
/// Defaults match the container created by [`crate::provision`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 3306,
            user: "root".into(),
            password: "mypassword".into(),
            database: "rahulshettyacademy".into(),
        }
    }
}

/// Configuration for one harness process.
#[derive(Clone, Default)]
pub struct HarnessConfig {
    api_keys: HashMap<String, String>,
    base_urls: HashMap<String, String>,
    model: Option<String>,
    max_turns: Option<usize>,
    pub database: DatabaseSettings,
    pub rest_base_url: Option<String>,
    resources_dir: Option<PathBuf>,
}

impl std::fmt::Debug for HarnessConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarnessConfig")
            .field("api_keys", &self.api_keys.keys().collect::<Vec<_>>())
            .field("base_urls", &self.base_urls)
            .field("model", &self.model)
            .field("max_turns", &self.max_turns)
            .field("database", &self.database.host)
            .field("rest_base_url", &self.rest_base_url)
            .field("resources_dir", &self.resources_dir)
            .finish()
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, HandoffError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Numeric variables that do not parse are a configuration error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HandoffError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();

        let key_mappings = [
            ("OPENAI_API_KEY", "openai"),
            ("OPENAI_COMPAT_API_KEY", "openai-compatible"),
        ];
        for (env_var, provider) in key_mappings {
            if let Some(key) = get(env_var) {
                config.set_api_key(provider, key);
            }
        }

        let url_mappings = [
            ("OPENAI_BASE_URL", "openai"),
            ("OPENAI_COMPAT_BASE_URL", "openai-compatible"),
        ];
        for (env_var, provider) in url_mappings {
            if let Some(url) = get(env_var) {
                config.set_base_url(provider, url);
            }
        }

        config.model = get("HANDOFF_MODEL");
        config.max_turns = parse_number("HANDOFF_MAX_TURNS", get("HANDOFF_MAX_TURNS"))?;
        config.rest_base_url = get("REST_BASE_URL");
        config.resources_dir = get("HANDOFF_RESOURCES_DIR").map(PathBuf::from);

        let db = &mut config.database;
        if let Some(host) = get("MYSQL_HOST") {
            db.host = host;
        }
        if let Some(port) = parse_number("MYSQL_PORT", get("MYSQL_PORT"))? {
            db.port = port;
        }
        if let Some(user) = get("MYSQL_USER") {
            db.user = user;
        }
        if let Some(password) = get("MYSQL_PASSWORD") {
            db.password = password;
        }
        if let Some(database) = get("MYSQL_DATABASE") {
            db.database = database;
        }

        Ok(config)
    }

    pub fn set_api_key(&mut self, provider: &str, key: String) {
        self.api_keys.insert(provider.to_string(), key);
    }

    pub fn api_key(&self, provider: &str) -> Option<String> {
        self.api_keys.get(provider).cloned()
    }

    /// Resolve an API key or fail with the variable the user should set.
    pub fn require_api_key(&self, provider: &str) -> Result<String, HandoffError> {
        self.api_key(provider).ok_or_else(|| {
            let var = match provider {
                "openai-compatible" => "OPENAI_COMPAT_API_KEY",
                _ => "OPENAI_API_KEY",
            };
            HandoffError::Authentication(format!(
                "{var} not found. Set it in the environment or a .env file."
            ))
        })
    }

    pub fn set_base_url(&mut self, provider: &str, url: String) {
        self.base_urls.insert(provider.to_string(), url);
    }

    pub fn base_url(&self, provider: &str) -> Option<String> {
        self.base_urls.get(provider).cloned()
    }

    /// Base URL for the plain OpenAI wire protocol serving `model_id`.
    ///
    /// An explicit `OPENAI_BASE_URL` wins; otherwise `gemini-*` models go to
    /// Google's OpenAI-compatible endpoint and everything else to the
    /// provider's default.
    pub fn openai_base_url_for(&self, model_id: &str) -> Option<String> {
        self.base_url("openai").or_else(|| {
            model_id
                .starts_with("gemini-")
                .then(|| GEMINI_OPENAI_BASE_URL.to_string())
        })
    }

    /// Model override from the environment, if any.
    pub fn model_override(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = Some(model.into());
    }

    pub fn max_turns_override(&self) -> Option<usize> {
        self.max_turns
    }

    /// Directory holding request collections, seed data and reports.
    pub fn resources_dir(&self) -> PathBuf {
        self.resources_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("resources"))
    }

    pub fn set_resources_dir(&mut self, dir: impl Into<PathBuf>) {
        self.resources_dir = Some(dir.into());
    }
}

fn parse_number<T: std::str::FromStr>(
    key: &str,
    value: Option<String>,
) -> Result<Option<T>, HandoffError> {
    value
        .map(|v| {
            v.trim().parse().map_err(|_| {
                HandoffError::Configuration(format!("{key} must be a number, got '{v}'"))
            })
        })
        .transpose()
}
