//! The seat an agent occupies in a team.

use async_trait::async_trait;

use super::transcript::{Transcript, TranscriptMessage};
use crate::error::HandoffError;

/// A team member that produces the next message from the transcript so far.
#[async_trait]
pub trait Participant: Send + Sync {
    /// Name used as the message speaker.
    fn name(&self) -> &str;

    /// Produce this participant's next message. Errors abort the run.
    async fn respond(&self, transcript: &Transcript) -> Result<TranscriptMessage, HandoffError>;
}
