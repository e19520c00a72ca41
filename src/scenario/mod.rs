//! Scenario definitions: the task, the agents and the hand-off workflow,
//! loaded from TOML.

pub mod catalog;

pub use catalog::{ScenarioCatalog, ScenarioSource, ScenarioSummary};

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::agent::AgentDescriptor;
use crate::error::HandoffError;
use crate::team::{TextMention, Workflow, WorkflowStage};
use crate::types::GenerationSettings;

/// Placeholder in instructions and task text replaced by the resources directory.
pub const RESOURCES_PLACEHOLDER: &str = "{resources}";

const DEFAULT_MAX_TURNS: usize = 60;

fn default_max_turns() -> usize {
    DEFAULT_MAX_TURNS
}

/// A complete, runnable scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub task: String,
    pub termination_marker: String,
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    /// Model override; the environment and command line take precedence.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub generation: GenerationSettings,
    pub agents: Vec<AgentDescriptor>,
    #[serde(default)]
    pub stages: Vec<WorkflowStage>,
}

impl ScenarioConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, HandoffError> {
        let scenario: Self = toml::from_str(source)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_path(path: &Path) -> Result<Self, HandoffError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            HandoffError::Configuration(format!("cannot read scenario {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), HandoffError> {
        let invalid = |message: String| {
            HandoffError::Configuration(format!("scenario '{}': {message}", self.name))
        };

        if self.agents.is_empty() {
            return Err(invalid("at least one agent is required".into()));
        }
        if self.max_turns == 0 {
            return Err(invalid("max_turns must be at least 1".into()));
        }
        if self.termination_marker.is_empty() {
            return Err(invalid("termination_marker must not be empty".into()));
        }

        let mut names = HashSet::new();
        for agent in &self.agents {
            if !names.insert(agent.name.as_str()) {
                return Err(invalid(format!("duplicate agent '{}'", agent.name)));
            }
        }
        for stage in &self.stages {
            if !names.contains(stage.agent.as_str()) {
                return Err(invalid(format!(
                    "stage '{}' names unknown agent '{}'",
                    stage.name, stage.agent
                )));
            }
        }
        self.generation
            .validate()
            .map_err(|e| invalid(e.to_string()))?;
        if !self.stages.is_empty() {
            Workflow::new(self.stages.clone()).map_err(|e| invalid(e.to_string()))?;
        }
        Ok(())
    }

    /// Substitute the resources directory into the task and instructions.
    pub fn with_resources_dir(mut self, dir: &Path) -> Self {
        let dir = dir.display().to_string();
        self.task = self.task.replace(RESOURCES_PLACEHOLDER, &dir);
        for agent in &mut self.agents {
            agent.instructions = agent.instructions.replace(RESOURCES_PLACEHOLDER, &dir);
        }
        self
    }

    pub fn termination(&self) -> TextMention {
        TextMention::new(self.termination_marker.clone())
    }

    pub fn workflow(&self) -> Result<Option<Workflow>, HandoffError> {
        if self.stages.is_empty() {
            return Ok(None);
        }
        Workflow::new(self.stages.clone()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Capability;
    use std::path::PathBuf;

    const MINIMAL: &str = r#"
        name = "mini"
        task = "go"
        termination_marker = "DONE"

        [[agents]]
        name = "A"
        instructions = "read {resources}/input.json"
        capabilities = ["filesystem"]

        [[agents]]
        name = "B"
        instructions = "say DONE"
    "#;

    #[test]
    fn minimal_scenario_uses_defaults() {
        let scenario = ScenarioConfig::from_toml_str(MINIMAL).unwrap();
        assert_eq!(scenario.max_turns, 60);
        assert!(scenario.model.is_none());
        assert!(scenario.workflow().unwrap().is_none());
        assert_eq!(scenario.agents[0].capabilities, vec![Capability::Filesystem]);
        assert!(scenario.termination().matches("all DONE"));
    }

    #[test]
    fn resources_placeholder_is_substituted() {
        let scenario = ScenarioConfig::from_toml_str(MINIMAL)
            .unwrap()
            .with_resources_dir(&PathBuf::from("/srv/resources"));
        assert_eq!(scenario.agents[0].instructions, "read /srv/resources/input.json");
    }

    #[test]
    fn stage_with_unknown_agent_is_rejected() {
        let source = format!(
            "{MINIMAL}\n[[stages]]\nname = \"s\"\nagent = \"Nobody\"\nmarker = \"X\"\n"
        );
        let err = ScenarioConfig::from_toml_str(&source).unwrap_err();
        assert!(matches!(err, HandoffError::Configuration(msg) if msg.contains("Nobody")));
    }

    #[test]
    fn empty_agent_list_is_rejected() {
        let err = ScenarioConfig::from_toml_str(
            "name = \"x\"\ntask = \"t\"\ntermination_marker = \"DONE\"\nagents = []\n",
        )
        .unwrap_err();
        assert!(matches!(err, HandoffError::Configuration(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ScenarioConfig::from_toml_str("name = ").unwrap_err();
        assert!(matches!(err, HandoffError::ScenarioParse(_)));
    }

    #[test]
    fn unknown_capability_is_a_parse_error() {
        let source = MINIMAL.replace("\"filesystem\"", "\"telepathy\"");
        assert!(matches!(
            ScenarioConfig::from_toml_str(&source),
            Err(HandoffError::ScenarioParse(_))
        ));
    }
}
