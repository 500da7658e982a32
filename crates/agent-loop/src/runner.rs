use std::sync::Arc;

use tokio::sync::mpsc;

use agent_core::tools::{parse_tool_args, ToolCall, ToolExecutor, ToolSchema};
use agent_core::{AgentError, AgentEvent, ConversationHistory, Message};
use agent_llm::LLMProvider;

use crate::config::AgentLoopConfig;
use crate::stream::handler::consume_llm_stream;

pub type Result<T> = std::result::Result<T, AgentError>;

/// Drives one conversation: forwards each query to the model and runs the
/// tools it asks for until it answers in plain text.
pub struct ConversationOrchestrator {
    llm: Arc<dyn LLMProvider>,
    tools: Arc<dyn ToolExecutor>,
    history: ConversationHistory,
    config: AgentLoopConfig,
    event_tx: Option<mpsc::Sender<AgentEvent>>,
}

impl ConversationOrchestrator {
    pub fn new(
        llm: Arc<dyn LLMProvider>,
        tools: Arc<dyn ToolExecutor>,
        config: AgentLoopConfig,
    ) -> Self {
        Self {
            llm,
            tools,
            history: ConversationHistory::new(),
            config,
            event_tx: None,
        }
    }

    /// Publish progress events on `event_tx`.
    pub fn with_events(mut self, event_tx: mpsc::Sender<AgentEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn config(&self) -> &AgentLoopConfig {
        &self.config
    }

    /// Answer one user query, extending the conversation history.
    ///
    /// On error the history keeps every complete exchange made so far and
    /// no unanswered tool call.
    pub async fn handle_query(&mut self, user_text: &str) -> Result<String> {
        if user_text.trim().is_empty() {
            return Err(AgentError::EmptyQuery);
        }

        log::debug!("Handling query: {}", user_text);
        self.history.push_user(user_text);

        let tool_schemas = self.tools.list_tools();
        let mut tool_calls_made = 0usize;
        let mut rounds = 0usize;

        loop {
            rounds += 1;
            let (content, tool_call) = self.request_completion(&tool_schemas, rounds).await?;

            let Some(tool_call) = tool_call else {
                self.history.push_assistant(content.clone());
                self.emit(AgentEvent::Complete { rounds }).await;
                log::debug!("Query answered after {} rounds", rounds);
                return Ok(content);
            };

            if tool_calls_made >= self.config.max_rounds {
                log::warn!(
                    "Tool call limit of {} reached, dropping call to {}",
                    self.config.max_rounds,
                    tool_call.function.name
                );
                return Err(AgentError::TooManyToolCalls(self.config.max_rounds));
            }
            tool_calls_made += 1;

            self.execute_tool_call(tool_call).await?;
        }
    }

    /// One model request. Returns the text and the first tool call, if any.
    async fn request_completion(
        &self,
        tool_schemas: &[ToolSchema],
        round: usize,
    ) -> Result<(String, Option<ToolCall>)> {
        let mut messages = Vec::with_capacity(self.history.len() + 1);
        messages.push(Message::system(self.config.system_prompt.clone()));
        messages.extend(self.history.messages().iter().cloned());

        log::debug!(
            "Round {}: requesting completion with {} messages",
            round,
            messages.len()
        );

        let stream = self
            .llm
            .chat_stream(&messages, tool_schemas)
            .await
            .map_err(|error| {
                log::error!("LLM request failed: {}", error);
                AgentError::ModelUnavailable(error.to_string())
            })?;
        let output = consume_llm_stream(stream).await?;

        let mut tool_calls = output.tool_calls.into_iter();
        let first = tool_calls.next();
        let surplus: Vec<String> = tool_calls.map(|call| call.function.name).collect();
        if !surplus.is_empty() {
            log::warn!(
                "Model requested {} extra tool calls, ignoring: {}",
                surplus.len(),
                surplus.join(", ")
            );
        }

        Ok((output.content, first))
    }

    async fn execute_tool_call(&mut self, tool_call: ToolCall) -> Result<()> {
        let tool_name = tool_call.function.name;
        let arguments = parse_tool_args(&tool_call.function.arguments).map_err(|error| {
            AgentError::MalformedToolArguments {
                tool: tool_name.clone(),
                reason: error.to_string(),
            }
        })?;

        log::info!("Executing tool: {} with args: {}", tool_name, arguments);
        self.emit(AgentEvent::ToolStart {
            tool_call_id: tool_call.id.clone(),
            tool_name: tool_name.clone(),
            arguments: arguments.clone(),
        })
        .await;

        let content = match self.tools.execute(&tool_name, arguments.clone()).await {
            Ok(output) => {
                self.emit(AgentEvent::ToolComplete {
                    tool_call_id: tool_call.id.clone(),
                    tool_name: tool_name.clone(),
                    found: !output.is_absent(),
                })
                .await;
                output.render()
            }
            Err(error) => {
                log::warn!("Tool {} failed: {}", tool_name, error);
                self.emit(AgentEvent::ToolError {
                    tool_call_id: tool_call.id.clone(),
                    error: error.to_string(),
                })
                .await;
                format!("Error: {error}")
            }
        };

        let call = ToolCall::new(tool_call.id.clone(), tool_name.clone(), arguments.to_string());
        self.history.push_tool_exchange(
            Message::assistant_tool_call(call),
            Message::tool_result(tool_call.id, tool_name, content),
        );

        Ok(())
    }

    async fn emit(&self, event: AgentEvent) {
        if let Some(event_tx) = &self.event_tx {
            let _ = event_tx.send(event).await;
            // Lets a receiver polled on this task print the event before the tool runs.
            tokio::task::yield_now().await;
        }
    }
}
