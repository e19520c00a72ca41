//! Progress events emitted while a team runs.

use std::sync::Arc;

use uuid::Uuid;

use super::coordinator::StopReason;
use super::transcript::TranscriptMessage;
use super::workflow::{WorkflowStage, WorkflowStatus};

/// Something observable happened during a run.
#[derive(Debug, Clone)]
pub enum TeamEvent {
    Started {
        run_id: Uuid,
        task: String,
    },
    /// A message was appended; `index` is its position in the transcript.
    Message {
        run_id: Uuid,
        index: usize,
        message: TranscriptMessage,
    },
    StageReached {
        run_id: Uuid,
        stage: WorkflowStage,
    },
    Finished {
        run_id: Uuid,
        stop_reason: StopReason,
        messages: usize,
        workflow: Option<WorkflowStatus>,
    },
}

impl TeamEvent {
    pub fn run_id(&self) -> Uuid {
        match self {
            Self::Started { run_id, .. }
            | Self::Message { run_id, .. }
            | Self::StageReached { run_id, .. }
            | Self::Finished { run_id, .. } => *run_id,
        }
    }
}

/// Callback invoked synchronously for every [`TeamEvent`].
pub type TeamObserver = Arc<dyn Fn(&TeamEvent) + Send + Sync>;
