//! Finding scenarios by name: built-ins first, then the user's directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use super::ScenarioConfig;
use crate::error::HandoffError;

const BUILTIN: &[(&str, &str)] = &[
    ("chaos", include_str!("../../scenarios/chaos.toml")),
    ("registration", include_str!("../../scenarios/registration.toml")),
];

/// Where a scenario was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioSource {
    Builtin,
    File(PathBuf),
}

impl std::fmt::Display for ScenarioSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => write!(f, "built-in"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSummary {
    pub name: String,
    pub description: String,
    pub source: ScenarioSource,
}

/// Scenario lookup over the built-ins and an optional user directory.
#[derive(Debug, Clone, Default)]
pub struct ScenarioCatalog {
    user_dir: Option<PathBuf>,
}

impl ScenarioCatalog {
    /// Catalog using the platform config dir, e.g. `~/.config/handoff/scenarios`.
    pub fn from_default_dirs() -> Self {
        let user_dir = ProjectDirs::from("", "", "handoff")
            .map(|dirs| dirs.config_dir().join("scenarios"));
        Self { user_dir }
    }

    pub fn with_user_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            user_dir: Some(dir.into()),
        }
    }

    pub fn builtin_only() -> Self {
        Self::default()
    }

    pub fn user_dir(&self) -> Option<&Path> {
        self.user_dir.as_deref()
    }

    /// Resolve `reference` as a file path, a built-in name or a user scenario name.
    pub fn load(&self, reference: &str) -> Result<ScenarioConfig, HandoffError> {
        let as_path = Path::new(reference);
        if reference.ends_with(".toml") || as_path.components().count() > 1 {
            debug!(path = %as_path.display(), "loading scenario file");
            return ScenarioConfig::from_path(as_path);
        }

        if let Some(source) = builtin_source(reference) {
            return ScenarioConfig::from_toml_str(source);
        }

        if let Some(path) = self.user_file(reference).filter(|p| p.is_file()) {
            debug!(path = %path.display(), "loading user scenario");
            return ScenarioConfig::from_path(&path);
        }

        // A user file whose stem differs from the `name` it declares.
        for path in self.user_files()? {
            if let Ok(scenario) = ScenarioConfig::from_path(&path) {
                if scenario.name == reference {
                    debug!(path = %path.display(), "loading user scenario by declared name");
                    return Ok(scenario);
                }
            }
        }

        Err(HandoffError::Configuration(format!(
            "unknown scenario '{reference}' (run `handoff scenarios` to list available ones)"
        )))
    }

    /// All scenarios, built-ins first. Unparseable user files are skipped.
    ///
    /// User scenarios are listed under their file stem, which is what
    /// [`load`](Self::load) resolves first.
    pub fn list(&self) -> Result<Vec<ScenarioSummary>, HandoffError> {
        let mut summaries = Vec::new();
        for (_, source) in BUILTIN {
            let scenario = ScenarioConfig::from_toml_str(source)?;
            summaries.push(ScenarioSummary {
                name: scenario.name,
                description: scenario.description,
                source: ScenarioSource::Builtin,
            });
        }

        for path in self.user_files()? {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            match ScenarioConfig::from_path(&path) {
                Ok(scenario) => summaries.push(ScenarioSummary {
                    name: stem,
                    description: scenario.description,
                    source: ScenarioSource::File(path),
                }),
                Err(error) => debug!(path = %path.display(), %error, "skipping scenario file"),
            }
        }
        Ok(summaries)
    }

    /// `*.toml` files in the user directory, sorted.
    fn user_files(&self) -> Result<Vec<PathBuf>, HandoffError> {
        let Some(dir) = self.user_dir.as_deref().filter(|d| d.is_dir()) else {
            return Ok(Vec::new());
        };
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn user_file(&self, name: &str) -> Option<PathBuf> {
        self.user_dir
            .as_ref()
            .map(|dir| dir.join(format!("{name}.toml")))
    }
}

fn builtin_source(name: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, source)| *source)
}
