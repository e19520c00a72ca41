//! Shared test helpers: a scripted provider, in-process tool endpoints and
//! participants.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use handoff::agent::{Capability, EndpointConnector};
use handoff::error::HandoffError;
use handoff::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use handoff::team::{Participant, Transcript, TranscriptMessage};
use handoff::tools::{AgentToolParameters, DiscoveredTool, ToolArguments, ToolEndpoint};
use handoff::types::*;

/// A provider that replays queued responses and records every request.
pub struct MockProvider {
    model_id: String,
    responses: Mutex<Vec<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a plain text response.
    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            tool_calls: vec![],
            finish_reason: Some(FinishReason::Stop),
        });
    }

    /// Queue a response asking for one tool call.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) {
        self.responses.lock().unwrap().push(ProviderResponse {
            text: String::new(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
            tool_calls: vec![AgentToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: args,
            }],
            finish_reason: Some(FinishReason::ToolCalls),
        });
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, HandoffError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(ProviderResponse {
                text: "Mock response".to_string(),
                finish_reason: Some(FinishReason::Stop),
                ..Default::default()
            });
        }
        Ok(responses.remove(0))
    }
}

/// An in-process tool endpoint with canned results per tool.
pub struct FakeEndpoint {
    name: String,
    tools: Vec<DiscoveredTool>,
    results: HashMap<String, serde_json::Value>,
    calls: Mutex<Vec<(String, serde_json::Value)>>,
    shutdowns: AtomicUsize,
}

impl FakeEndpoint {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tools: Vec::new(),
            results: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            shutdowns: AtomicUsize::new(0),
        }
    }

    /// Advertise `tool` and answer every call to it with `result`.
    pub fn with_tool(mut self, tool: &str, result: serde_json::Value) -> Self {
        self.tools.push(DiscoveredTool {
            name: tool.to_string(),
            description: format!("{tool} on {}", self.name),
            parameters: AgentToolParameters::from_schema(serde_json::json!({
                "type": "object",
                "properties": {}
            })),
        });
        self.results.insert(tool.to_string(), result);
        self
    }

    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn shutdown_count(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolEndpoint for FakeEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_tools(&self) -> Result<Vec<DiscoveredTool>, HandoffError> {
        Ok(self.tools.clone())
    }

    async fn invoke(
        &self,
        tool: &str,
        args: &ToolArguments,
    ) -> Result<serde_json::Value, HandoffError> {
        self.calls
            .lock()
            .unwrap()
            .push((tool.to_string(), args.raw().clone()));
        self.results
            .get(tool)
            .cloned()
            .ok_or_else(|| HandoffError::ToolExecution {
                tool_name: tool.to_string(),
                message: format!("unknown tool on {}", self.name),
            })
    }

    async fn shutdown(&self) -> Result<(), HandoffError> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A participant that replies from a fixed script, cycling when exhausted.
pub struct ScriptedParticipant {
    name: String,
    replies: Vec<String>,
    calls: AtomicUsize,
    fail_on_call: Option<usize>,
    seen_lengths: Mutex<Vec<usize>>,
}

impl ScriptedParticipant {
    pub fn new(name: &str, replies: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            replies: replies.iter().map(|r| r.to_string()).collect(),
            calls: AtomicUsize::new(0),
            fail_on_call: None,
            seen_lengths: Mutex::new(Vec::new()),
        }
    }

    /// Fail on the `n`th call (1-based).
    pub fn failing_on(mut self, n: usize) -> Self {
        self.fail_on_call = Some(n);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Transcript length observed at each call.
    pub fn seen_lengths(&self) -> Vec<usize> {
        self.seen_lengths.lock().unwrap().clone()
    }
}

#[async_trait]
impl Participant for ScriptedParticipant {
    fn name(&self) -> &str {
        &self.name
    }

    async fn respond(&self, transcript: &Transcript) -> Result<TranscriptMessage, HandoffError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.seen_lengths.lock().unwrap().push(transcript.len());
        if self.fail_on_call == Some(call) {
            return Err(HandoffError::ToolExecution {
                tool_name: "query".into(),
                message: "connection refused".into(),
            }
            .in_agent(self.name.clone()));
        }
        let text = if self.replies.is_empty() {
            format!("{} turn {call}", self.name)
        } else {
            self.replies[(call - 1) % self.replies.len()].clone()
        };
        Ok(TranscriptMessage::new(self.name.clone(), text))
    }
}

/// Wrap participants for [`handoff::team::RoundRobinTeam::new`].
pub fn seats(participants: &[Arc<ScriptedParticipant>]) -> Vec<Arc<dyn Participant>> {
    participants
        .iter()
        .map(|p| Arc::clone(p) as Arc<dyn Participant>)
        .collect()
}

/// Hands out prebuilt endpoints per capability and counts connections.
#[derive(Default)]
pub struct FakeConnector {
    endpoints: HashMap<Capability, Arc<FakeEndpoint>>,
    missing: Vec<Capability>,
    connects: AtomicUsize,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, capability: Capability, endpoint: FakeEndpoint) -> Self {
        self.endpoints.insert(capability, Arc::new(endpoint));
        self
    }

    /// Make the prerequisite check for `capability` fail.
    pub fn with_missing(mut self, capability: Capability) -> Self {
        self.missing.push(capability);
        self
    }

    pub fn endpoint(&self, capability: Capability) -> Arc<FakeEndpoint> {
        Arc::clone(&self.endpoints[&capability])
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EndpointConnector for FakeConnector {
    fn check(&self, capability: Capability) -> Result<(), HandoffError> {
        if self.missing.contains(&capability) {
            return Err(HandoffError::missing_command(
                "npx",
                format!("needed for {capability}"),
            ));
        }
        Ok(())
    }

    async fn connect(&self, capability: Capability) -> Result<Arc<dyn ToolEndpoint>, HandoffError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let endpoint = self.endpoints.get(&capability).ok_or_else(|| {
            HandoffError::Configuration(format!("no fake endpoint for {capability}"))
        })?;
        Ok(Arc::clone(endpoint) as Arc<dyn ToolEndpoint>)
    }
}
