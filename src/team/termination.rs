//! Conditions that end a team run.

use super::transcript::Transcript;
use crate::error::HandoffError;

/// Decides, after each agent message, whether the run is over.
pub trait TerminationCondition: Send + Sync {
    /// Check the transcript as it stands after the latest message.
    fn should_terminate(&self, transcript: &Transcript) -> bool;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Stop when the latest message contains a marker string.
///
/// The check is an exact substring match: case, whitespace and punctuation
/// all count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMention {
    marker: String,
}

impl TextMention {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    pub fn matches(&self, text: &str) -> bool {
        text.contains(&self.marker)
    }
}

impl TerminationCondition for TextMention {
    fn should_terminate(&self, transcript: &Transcript) -> bool {
        transcript
            .last()
            .map(|message| self.matches(&message.text))
            .unwrap_or(false)
    }

    fn describe(&self) -> String {
        format!("text mention {:?}", self.marker)
    }
}

/// Stop when the latest message matches a regular expression.
#[derive(Debug, Clone)]
pub struct RegexMention {
    regex: regex::Regex,
}

impl RegexMention {
    pub fn new(pattern: &str) -> Result<Self, HandoffError> {
        let regex = regex::Regex::new(pattern)
            .map_err(|e| HandoffError::InvalidArgument(format!("invalid termination pattern: {e}")))?;
        Ok(Self { regex })
    }
}

impl TerminationCondition for RegexMention {
    fn should_terminate(&self, transcript: &Transcript) -> bool {
        transcript
            .last()
            .map(|message| self.regex.is_match(&message.text))
            .unwrap_or(false)
    }

    fn describe(&self) -> String {
        format!("regex /{}/", self.regex.as_str())
    }
}

/// Stop once the transcript holds `max_messages` messages, task included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxMessageTermination {
    max_messages: usize,
}

impl MaxMessageTermination {
    pub fn new(max_messages: usize) -> Self {
        Self { max_messages }
    }
}

impl TerminationCondition for MaxMessageTermination {
    fn should_terminate(&self, transcript: &Transcript) -> bool {
        transcript.len() >= self.max_messages
    }

    fn describe(&self) -> String {
        format!("max {} messages", self.max_messages)
    }
}

/// Stops when any inner condition does.
pub struct AnyOf {
    conditions: Vec<Box<dyn TerminationCondition>>,
}

impl TerminationCondition for AnyOf {
    fn should_terminate(&self, transcript: &Transcript) -> bool {
        self.conditions
            .iter()
            .any(|condition| condition.should_terminate(transcript))
    }

    fn describe(&self) -> String {
        self.conditions
            .iter()
            .map(|condition| condition.describe())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

pub fn any_of(conditions: Vec<Box<dyn TerminationCondition>>) -> AnyOf {
    AnyOf { conditions }
}
