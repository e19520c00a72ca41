//! Round-robin turn coordinator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::events::{TeamEvent, TeamObserver};
use super::participant::Participant;
use super::termination::TerminationCondition;
use super::transcript::Transcript;
use super::workflow::{Workflow, WorkflowStatus};
use crate::error::HandoffError;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    /// The termination condition fired on the latest message.
    Terminated,
    /// The turn budget ran out first.
    MaxTurns,
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct TeamRunResult {
    pub run_id: Uuid,
    pub transcript: Transcript,
    pub stop_reason: StopReason,
    /// Number of agent turns taken (the task message is not a turn).
    pub turns: usize,
    /// Present when the team was given a workflow.
    pub workflow: Option<WorkflowStatus>,
}

impl TeamRunResult {
    /// True when the run stopped on its condition and the workflow, if any, completed.
    pub fn is_complete(&self) -> bool {
        self.stop_reason == StopReason::Terminated
            && self
                .workflow
                .as_ref()
                .map_or(true, |status| *status == WorkflowStatus::Completed)
    }
}

/// Index of the participant whose turn it is after `turns` turns.
pub fn active_index(turns: usize, participants: usize) -> usize {
    turns % participants
}

/// Participants speak one at a time in fixed order until the termination
/// condition fires or `max_turns` agent messages have been produced.
pub struct RoundRobinTeam {
    participants: Vec<Arc<dyn Participant>>,
    termination: Box<dyn TerminationCondition>,
    max_turns: usize,
    workflow: Option<Workflow>,
    observer: Option<TeamObserver>,
}

impl RoundRobinTeam {
    pub fn new(
        participants: Vec<Arc<dyn Participant>>,
        termination: Box<dyn TerminationCondition>,
        max_turns: usize,
    ) -> Result<Self, HandoffError> {
        if participants.is_empty() {
            return Err(HandoffError::InvalidArgument(
                "a team needs at least one participant".into(),
            ));
        }
        if max_turns == 0 {
            return Err(HandoffError::InvalidArgument(
                "max_turns must be at least 1".into(),
            ));
        }
        Ok(Self {
            participants,
            termination,
            max_turns,
            workflow: None,
            observer: None,
        })
    }

    pub fn with_workflow(mut self, workflow: Workflow) -> Self {
        self.workflow = Some(workflow);
        self
    }

    pub fn with_observer(mut self, observer: TeamObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn participants(&self) -> &[Arc<dyn Participant>] {
        &self.participants
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Run the team on `task`.
    ///
    /// The first participant error aborts the run and is returned unchanged.
    /// Exhausting the turn budget is not an error; inspect
    /// [`TeamRunResult::stop_reason`] and [`TeamRunResult::workflow`].
    pub async fn run(&self, task: &str) -> Result<TeamRunResult, HandoffError> {
        let run_id = Uuid::new_v4();
        let mut transcript = Transcript::with_task(task);
        let mut tracker = self.workflow.as_ref().map(Workflow::tracker);
        let mut turns = 0usize;

        info!(%run_id, participants = self.participants.len(), max_turns = self.max_turns,
            termination = %self.termination.describe(), "team run started");
        self.emit(TeamEvent::Started {
            run_id,
            task: task.to_string(),
        });
        if let Some(first) = transcript.last() {
            self.emit(TeamEvent::Message {
                run_id,
                index: 0,
                message: first.clone(),
            });
        }

        let stop_reason = loop {
            let participant = &self.participants[active_index(turns, self.participants.len())];
            debug!(%run_id, turn = turns + 1, agent = participant.name(), "turn started");

            let message = participant.respond(&transcript).await?;
            transcript.push(message.clone());
            turns += 1;
            info!(%run_id, turn = turns, agent = %message.speaker, chars = message.text.len(), "turn completed");

            self.emit(TeamEvent::Message {
                run_id,
                index: transcript.len() - 1,
                message: message.clone(),
            });
            if let Some(stage) = tracker.as_mut().and_then(|t| t.observe(&message)) {
                self.emit(TeamEvent::StageReached {
                    run_id,
                    stage: stage.clone(),
                });
            }

            if self.termination.should_terminate(&transcript) {
                break StopReason::Terminated;
            }
            if turns >= self.max_turns {
                break StopReason::MaxTurns;
            }
        };

        let workflow = tracker.map(|t| t.status());
        match (&stop_reason, &workflow) {
            (StopReason::MaxTurns, _) => {
                warn!(%run_id, turns, "turn budget exhausted before termination marker")
            }
            (_, Some(status @ WorkflowStatus::Incomplete { .. })) => {
                warn!(%run_id, %status, "run terminated with workflow incomplete")
            }
            _ => info!(%run_id, turns, "team run finished"),
        }

        self.emit(TeamEvent::Finished {
            run_id,
            stop_reason,
            messages: transcript.len(),
            workflow: workflow.clone(),
        });

        Ok(TeamRunResult {
            run_id,
            transcript,
            stop_reason,
            turns,
            workflow,
        })
    }

    fn emit(&self, event: TeamEvent) {
        if let Some(observer) = &self.observer {
            observer(&event);
        }
    }
}
