//! Text generation with tool loop.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::HandoffError;
use crate::provider::{ModelProvider, ProviderRequest, ToolDefinition};
use crate::tools::{Tool, ToolArguments};
use crate::types::*;

/// Maximum tool loop iterations to prevent infinite loops.
pub const MAX_TOOL_ITERATIONS: usize = 20;

/// One provider round trip and the tool calls it triggered.
#[derive(Debug, Clone)]
pub struct GenerationStep {
    pub text: String,
    pub tool_calls: Vec<AgentToolCall>,
    pub tool_results: Vec<AgentToolResult>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Final output of [`generate_text`].
#[derive(Debug, Clone)]
pub struct GenerateTextResult {
    pub text: String,
    pub steps: Vec<GenerationStep>,
    pub messages: Vec<ModelMessage>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Generate text, executing tool calls until the model answers in plain text.
///
/// Unknown tools and failing tool calls abort generation with an error.
/// After [`MAX_TOOL_ITERATIONS`] rounds the last text is returned with
/// [`FinishReason::Length`].
pub async fn generate_text(
    provider: &dyn ModelProvider,
    mut messages: Vec<ModelMessage>,
    settings: GenerationSettings,
    tools: &[Arc<dyn Tool>],
) -> Result<GenerateTextResult, HandoffError> {
    let tool_defs: Option<Vec<ToolDefinition>> = if tools.is_empty() {
        None
    } else {
        Some(tools.iter().map(|t| t.definition()).collect())
    };

    let mut steps = Vec::new();
    let mut total_usage = Usage::default();

    for iteration in 0..MAX_TOOL_ITERATIONS {
        let request = ProviderRequest {
            messages: messages.clone(),
            settings: settings.clone(),
            tools: tool_defs.clone(),
        };

        debug!(iteration, model = provider.model_id(), "generate_text: calling provider");
        let response = provider.generate_text(&request).await?;
        total_usage += response.usage;

        let mut step = GenerationStep {
            text: response.text.clone(),
            tool_calls: response.tool_calls.clone(),
            tool_results: Vec::new(),
            usage: response.usage,
            finish_reason: response.finish_reason,
        };

        if response.tool_calls.is_empty() {
            steps.push(step);
            return Ok(GenerateTextResult {
                text: response.text,
                steps,
                messages,
                usage: total_usage,
                finish_reason: response.finish_reason,
            });
        }

        messages.push(ModelMessage::assistant_tool_calls(
            response.text.clone(),
            response.tool_calls.clone(),
        ));

        for call in &response.tool_calls {
            let tool = tools
                .iter()
                .find(|t| t.name() == call.name)
                .ok_or_else(|| HandoffError::ToolExecution {
                    tool_name: call.name.clone(),
                    message: "tool not found".into(),
                })?;

            debug!(tool = %call.name, "executing tool call");
            let args = ToolArguments::new(call.arguments.clone());
            let value = tool.execute(&args).await.map_err(|error| {
                warn!(tool = %call.name, %error, "tool execution failed");
                error
            })?;

            let result = AgentToolResult {
                tool_call_id: call.id.clone(),
                result: value,
            };
            messages.push(ModelMessage::tool_result(
                result.tool_call_id.clone(),
                result.result.clone(),
            ));
            step.tool_results.push(result);
        }

        steps.push(step);
    }

    warn!(limit = MAX_TOOL_ITERATIONS, "tool loop hit iteration limit");
    let last_text = steps.last().map(|s| s.text.clone()).unwrap_or_default();
    Ok(GenerateTextResult {
        text: last_text,
        steps,
        messages,
        usage: total_usage,
        finish_reason: Some(FinishReason::Length),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderResponse;
    use crate::tools::AgentToolParameters;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedProvider {
        responses: Mutex<VecDeque<ProviderResponse>>,
        requests: Mutex<Vec<ProviderRequest>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<ProviderResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelProvider for ScriptedProvider {
        fn provider_name(&self) -> &str {
            "scripted"
        }

        fn model_id(&self) -> &str {
            "scripted-model"
        }

        async fn generate_text(
            &self,
            request: &ProviderRequest,
        ) -> Result<ProviderResponse, HandoffError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| text_response("fallback")))
        }
    }

    struct EchoTool {
        params: AgentToolParameters,
        fail: bool,
    }

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "echo arguments"
        }

        fn parameters(&self) -> &AgentToolParameters {
            &self.params
        }

        async fn execute(&self, args: &ToolArguments) -> Result<serde_json::Value, HandoffError> {
            if self.fail {
                return Err(HandoffError::ToolExecution {
                    tool_name: "echo".into(),
                    message: "boom".into(),
                });
            }
            Ok(args.raw().clone())
        }
    }

    fn echo(fail: bool) -> Vec<Arc<dyn Tool>> {
        vec![Arc::new(EchoTool {
            params: AgentToolParameters::empty(),
            fail,
        })]
    }

    fn text_response(text: &str) -> ProviderResponse {
        ProviderResponse {
            text: text.into(),
            finish_reason: Some(FinishReason::Stop),
            ..Default::default()
        }
    }

    fn tool_call_response(name: &str) -> ProviderResponse {
        ProviderResponse {
            tool_calls: vec![AgentToolCall {
                id: "call_1".into(),
                name: name.into(),
                arguments: json!({"x": 1}),
            }],
            finish_reason: Some(FinishReason::ToolCalls),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn plain_text_response_finishes_in_one_step() {
        let provider = ScriptedProvider::new(vec![text_response("BASELINE_DATA_READY")]);
        let result = generate_text(&provider, vec![ModelMessage::user("go")], Default::default(), &[])
            .await
            .unwrap();
        assert_eq!(result.text, "BASELINE_DATA_READY");
        assert_eq!(result.steps.len(), 1);
        assert!(provider.requests.lock().unwrap()[0].tools.is_none());
    }

    #[tokio::test]
    async fn tool_results_are_fed_back_before_final_text() {
        let provider =
            ScriptedProvider::new(vec![tool_call_response("echo"), text_response("done")]);
        let result = generate_text(
            &provider,
            vec![ModelMessage::user("go")],
            Default::default(),
            &echo(false),
        )
        .await
        .unwrap();

        assert_eq!(result.text, "done");
        assert_eq!(result.steps[0].tool_results[0].result, json!({"x": 1}));

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        let second = &requests[1].messages;
        assert_eq!(second.len(), 3);
        assert_eq!(second[1].tool_calls()[0].name, "echo");
        assert_eq!(second[2].role, Role::Tool);
    }

    #[tokio::test]
    async fn failing_tool_aborts_generation() {
        let provider = ScriptedProvider::new(vec![tool_call_response("echo")]);
        let err = generate_text(
            &provider,
            vec![ModelMessage::user("go")],
            Default::default(),
            &echo(true),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, HandoffError::ToolExecution { message, .. } if message == "boom"));
    }

    #[tokio::test]
    async fn unknown_tool_aborts_generation() {
        let provider = ScriptedProvider::new(vec![tool_call_response("drop_tables")]);
        let err = generate_text(
            &provider,
            vec![ModelMessage::user("go")],
            Default::default(),
            &echo(false),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, HandoffError::ToolExecution { tool_name, .. } if tool_name == "drop_tables"));
    }

    #[tokio::test]
    async fn iteration_limit_returns_length() {
        let script = (0..MAX_TOOL_ITERATIONS).map(|_| tool_call_response("echo")).collect();
        let provider = ScriptedProvider::new(script);
        let result = generate_text(
            &provider,
            vec![ModelMessage::user("go")],
            Default::default(),
            &echo(false),
        )
        .await
        .unwrap();
        assert_eq!(result.finish_reason, Some(FinishReason::Length));
        assert_eq!(result.steps.len(), MAX_TOOL_ITERATIONS);
    }
}
