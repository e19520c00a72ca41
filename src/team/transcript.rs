//! The shared conversation record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Speaker label of the synthetic first message holding the task.
pub const TASK_SPEAKER: &str = "user";

/// One entry in a [`Transcript`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub speaker: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptMessage {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only list of messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<TranscriptMessage>,
}

impl Transcript {
    /// Start a transcript with the task message.
    pub fn with_task(task: impl Into<String>) -> Self {
        Self {
            messages: vec![TranscriptMessage::new(TASK_SPEAKER, task)],
        }
    }

    pub fn push(&mut self, message: TranscriptMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[TranscriptMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&TranscriptMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptMessage> {
        self.messages.iter()
    }

    /// Speakers in order, handy for asserting turn order.
    pub fn speakers(&self) -> Vec<&str> {
        self.messages.iter().map(|m| m.speaker.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptMessage;
    type IntoIter = std::slice::Iter<'a, TranscriptMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
