//! An agent answering its turns through a model provider and its tools.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::descriptor::AgentDescriptor;
use crate::error::HandoffError;
use crate::generation::generate_text;
use crate::provider::ModelProvider;
use crate::team::{Participant, Transcript, TranscriptMessage};
use crate::tools::Tool;
use crate::types::*;

/// A team participant backed by a language model.
pub struct Agent {
    descriptor: AgentDescriptor,
    provider: Arc<dyn ModelProvider>,
    tools: Vec<Arc<dyn Tool>>,
    settings: GenerationSettings,
}

impl Agent {
    pub fn new(descriptor: AgentDescriptor, provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            descriptor,
            provider,
            tools: Vec::new(),
            settings: GenerationSettings::default(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn descriptor(&self) -> &AgentDescriptor {
        &self.descriptor
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Render the transcript from this agent's point of view.
    ///
    /// Its own earlier messages become assistant turns; everyone else's
    /// (including the task) become user turns tagged with the speaker.
    pub fn prompt_messages(&self, transcript: &Transcript) -> Vec<ModelMessage> {
        let mut messages = Vec::with_capacity(transcript.len() + 1);
        messages.push(ModelMessage::system(self.descriptor.instructions.clone()));
        messages.extend(transcript.iter().map(|entry| {
            if entry.speaker == self.descriptor.name {
                ModelMessage::assistant(entry.text.clone())
            } else {
                ModelMessage::user(entry.text.clone()).with_name(entry.speaker.clone())
            }
        }));
        messages
    }
}

#[async_trait]
impl Participant for Agent {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    async fn respond(&self, transcript: &Transcript) -> Result<TranscriptMessage, HandoffError> {
        let messages = self.prompt_messages(transcript);
        let result = generate_text(
            self.provider.as_ref(),
            messages,
            self.settings.clone(),
            &self.tools,
        )
        .await
        .map_err(|error| error.in_agent(self.descriptor.name.clone()))?;

        debug!(
            agent = %self.descriptor.name,
            steps = result.steps.len(),
            tokens = result.usage.total_tokens,
            "agent responded"
        );
        Ok(TranscriptMessage::new(self.descriptor.name.clone(), result.text))
    }
}
