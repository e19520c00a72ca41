//! Explicit stage tracking for marker-driven hand-offs.
//!
//! A workflow is an ordered list of stages. Each stage names the agent
//! expected to announce it and the marker it announces with. Stage `k`
//! transitions only to stage `k + 1`; markers seen out of order are ignored.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::transcript::TranscriptMessage;
use crate::error::HandoffError;

/// One step of a hand-off workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStage {
    pub name: String,
    pub agent: String,
    pub marker: String,
}

/// Validated, ordered stage list with its transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workflow {
    stages: Vec<WorkflowStage>,
}

impl Workflow {
    pub fn new(stages: Vec<WorkflowStage>) -> Result<Self, HandoffError> {
        if stages.is_empty() {
            return Err(HandoffError::InvalidArgument(
                "workflow needs at least one stage".into(),
            ));
        }
        for (i, stage) in stages.iter().enumerate() {
            if stage.marker.is_empty() {
                return Err(HandoffError::InvalidArgument(format!(
                    "workflow stage '{}' has an empty marker",
                    stage.name
                )));
            }
            if stages[..i].iter().any(|earlier| earlier.name == stage.name) {
                return Err(HandoffError::InvalidArgument(format!(
                    "duplicate workflow stage '{}'",
                    stage.name
                )));
            }
        }
        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[WorkflowStage] {
        &self.stages
    }

    pub fn first(&self) -> &WorkflowStage {
        &self.stages[0]
    }

    pub fn final_stage(&self) -> &WorkflowStage {
        &self.stages[self.stages.len() - 1]
    }

    /// Transition table lookup: the stage that follows `stage`, if any.
    pub fn next_after(&self, stage: &str) -> Option<&WorkflowStage> {
        let index = self.stages.iter().position(|s| s.name == stage)?;
        self.stages.get(index + 1)
    }

    pub fn tracker(&self) -> WorkflowTracker<'_> {
        WorkflowTracker {
            workflow: self,
            reached: None,
        }
    }
}

/// Outcome of a run with respect to its workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkflowStatus {
    Completed,
    Incomplete { reached_stage: Option<String> },
}

impl std::fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Incomplete {
                reached_stage: Some(stage),
            } => write!(f, "incomplete (reached {stage})"),
            Self::Incomplete {
                reached_stage: None,
            } => write!(f, "incomplete (no stage reached)"),
        }
    }
}

/// Follows a transcript through a [`Workflow`].
#[derive(Debug, Clone)]
pub struct WorkflowTracker<'a> {
    workflow: &'a Workflow,
    reached: Option<usize>,
}

impl<'a> WorkflowTracker<'a> {
    /// Feed one message; returns the stage it advanced to, if any.
    pub fn observe(&mut self, message: &TranscriptMessage) -> Option<&'a WorkflowStage> {
        let workflow = self.workflow;
        let next_index = self.reached.map_or(0, |i| i + 1);
        let next = workflow.stages.get(next_index)?;
        if message.speaker == next.agent && message.text.contains(&next.marker) {
            self.reached = Some(next_index);
            info!(stage = %next.name, agent = %next.agent, "workflow stage reached");
            return Some(next);
        }
        None
    }

    pub fn current(&self) -> Option<&'a WorkflowStage> {
        let workflow = self.workflow;
        self.reached.map(|i| &workflow.stages[i])
    }

    /// The stage the workflow is waiting for.
    pub fn expected(&self) -> Option<&'a WorkflowStage> {
        let workflow = self.workflow;
        workflow.stages.get(self.reached.map_or(0, |i| i + 1))
    }

    pub fn status(&self) -> WorkflowStatus {
        if self.reached == Some(self.workflow.stages.len() - 1) {
            WorkflowStatus::Completed
        } else {
            WorkflowStatus::Incomplete {
                reached_stage: self.current().map(|s| s.name.clone()),
            }
        }
    }
}
