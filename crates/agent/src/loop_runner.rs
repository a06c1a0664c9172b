//! The tool-call dispatch loop.
//!
//! Each round sends the full transcript plus the tool manifest to the model
//! backend, executes whatever tools the response requests, appends one result
//! message per request, and asks again. The loop ends when a response carries
//! no tool requests.
//!
//! The model backend expects every tool-call id to receive exactly one
//! corresponding tool-result message before the next completion request;
//! omitting one stalls its ability to produce a coherent next turn. Requested
//! calls therefore execute strictly in emission order, one at a time, and
//! their results are appended in that same order.

use deskhand_core::message::{Conversation, Message, Role};
use deskhand_core::provider::{Provider, ProviderRequest};
use deskhand_core::tool::{ToolCall, ToolRegistry};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// The dispatch loop that orchestrates model calls and tool execution.
pub struct AgentLoop {
    /// The model backend to use
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Default max tokens per response
    max_tokens: Option<u32>,

    /// Tool registry
    tools: Arc<ToolRegistry>,

    /// The system directive, inserted once at session start
    system_prompt: String,

    /// Maximum tool rounds per turn
    max_iterations: u32,

    /// External abort flag, honored between rounds
    cancel: Arc<AtomicBool>,
}

impl AgentLoop {
    /// Create a new dispatch loop.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            system_prompt: system_prompt.into(),
            max_iterations: 25,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the maximum number of tool rounds.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the default max tokens per model response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Share an abort flag with the caller. When set, the loop stops at the
    /// next round boundary — never mid-tool-execution — and returns
    /// `Error::Cancelled` with the transcript intact.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Process the conversation until the model produces a final answer.
    ///
    /// The conversation must already contain the newest user message. The
    /// system directive is inserted as the first message if not present yet;
    /// it is set once and never re-appended.
    ///
    /// On success the final assistant text is returned and the conversation
    /// holds the complete transcript of the turn. A backend failure rejects
    /// the whole round: the transcript keeps everything up to, but not
    /// including, the failed round.
    pub async fn process(
        &self,
        conversation: &mut Conversation,
    ) -> Result<String, deskhand_core::Error> {
        info!(
            conversation_id = %conversation.id,
            messages = conversation.messages.len(),
            "Processing conversation"
        );

        if conversation.messages.first().map(|m| &m.role) != Some(&Role::System) {
            conversation
                .messages
                .insert(0, Message::system(&self.system_prompt));
        }

        let tool_definitions = self.tools.definitions();
        let mut iteration = 0;

        loop {
            if self.cancel.load(Ordering::SeqCst) {
                info!(conversation_id = %conversation.id, "Cancelled between rounds");
                return Err(deskhand_core::Error::Cancelled);
            }

            iteration += 1;

            if iteration > self.max_iterations {
                warn!(
                    conversation_id = %conversation.id,
                    iterations = iteration,
                    "Max tool rounds reached, forcing text response"
                );
                break;
            }

            debug!(
                conversation_id = %conversation.id,
                iteration = iteration,
                "Dispatch round"
            );

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: conversation.snapshot().to_vec(),
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
                stream: false,
            };

            let response = self.provider.complete(request).await?;

            if let Some(usage) = &response.usage {
                debug!(
                    conversation_id = %conversation.id,
                    tokens = usage.total_tokens,
                    "Round completed"
                );
            }

            // No tool requests — this is the final text response
            if response.message.tool_calls.is_empty() {
                let response_text = response.message.content.clone();
                conversation.push(response.message);
                return Ok(response_text);
            }

            // The model requested tools — execute every call in emission
            // order before asking again
            let tool_calls = response.message.tool_calls.clone();
            debug!(tool_count = tool_calls.len(), "Executing tool calls");
            conversation.push(response.message);

            for tc in &tool_calls {
                let call = ToolCall {
                    id: tc.id.clone(),
                    name: tc.name.clone(),
                    arguments: serde_json::from_str(&tc.arguments).unwrap_or_default(),
                };

                let start = std::time::Instant::now();
                let result = self.tools.execute(&call).await;
                let duration_ms = start.elapsed().as_millis() as u64;

                let content = match result {
                    Ok(tool_result) => {
                        debug!(
                            tool = %tc.name,
                            success = tool_result.success,
                            duration_ms,
                            "Tool executed"
                        );
                        tool_result.output
                    }
                    Err(e) => {
                        // All tool failure is converted to text for the model
                        // to see; nothing propagates as a process failure
                        warn!(tool = %tc.name, error = %e, duration_ms, "Tool execution failed");
                        format!("Error: {e}")
                    }
                };

                conversation.push(Message::tool_result(&tc.id, &tc.name, content));
            }

            // Loop back — the model will see the tool results and decide
            // what to do next
        }

        Ok(
            "I've reached the maximum number of tool rounds. Please provide further guidance."
                .into(),
        )
    }
}
