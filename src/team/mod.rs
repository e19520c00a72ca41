//! Multi-agent team orchestration: a transcript shared by participants that
//! take turns in a fixed order until a termination condition fires.

pub mod coordinator;
pub mod events;
pub mod participant;
pub mod termination;
pub mod transcript;
pub mod workflow;

pub use coordinator::{RoundRobinTeam, StopReason, TeamRunResult};
pub use events::{TeamEvent, TeamObserver};
pub use participant::Participant;
pub use termination::{
    any_of, AnyOf, MaxMessageTermination, RegexMention, TerminationCondition, TextMention,
};
pub use transcript::{Transcript, TranscriptMessage, TASK_SPEAKER};
pub use workflow::{Workflow, WorkflowStage, WorkflowStatus, WorkflowTracker};
