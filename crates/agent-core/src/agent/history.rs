use thiserror::Error;

use crate::agent::types::{Message, Role};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("message {index}: tool result without a tool_call_id")]
    MissingToolCallId { index: usize },

    #[error("message {index}: tool result for {tool_call_id} does not follow its tool call")]
    OrphanToolResult { index: usize, tool_call_id: String },

    #[error("message {index}: tool call {tool_call_id} is not answered by the next message")]
    UnansweredToolCall { index: usize, tool_call_id: String },

    #[error("message {index}: history must not contain system messages")]
    SystemMessage { index: usize },
}

/// Append-only record of one conversation.
///
/// Tool calls only enter the history together with their result, see
/// [`ConversationHistory::push_tool_exchange`].
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    messages: Vec<Message>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Appends an assistant tool-call message and the tool message answering it.
    ///
    /// Panics in debug builds if the pair is not correlated.
    pub fn push_tool_exchange(&mut self, call: Message, result: Message) {
        debug_assert_eq!(call.role, Role::Assistant);
        debug_assert_eq!(result.role, Role::Tool);
        debug_assert_eq!(
            call.tool_call.as_ref().map(|c| c.id.as_str()),
            result.tool_call_id.as_deref()
        );

        self.messages.push(call);
        self.messages.push(result);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Checks tool-call/tool-result adjacency and reports the first violation.
    pub fn validate(&self) -> Result<(), HistoryError> {
        validate_messages(&self.messages)
    }
}

pub fn validate_messages(messages: &[Message]) -> Result<(), HistoryError> {
    for (index, message) in messages.iter().enumerate() {
        match message.role {
            Role::System => return Err(HistoryError::SystemMessage { index }),
            Role::Tool => {
                let tool_call_id = message
                    .tool_call_id
                    .as_deref()
                    .ok_or(HistoryError::MissingToolCallId { index })?;

                let answers_previous = index
                    .checked_sub(1)
                    .and_then(|prev| messages[prev].tool_call.as_ref())
                    .is_some_and(|call| call.id == tool_call_id);

                if !answers_previous {
                    return Err(HistoryError::OrphanToolResult {
                        index,
                        tool_call_id: tool_call_id.to_string(),
                    });
                }
            }
            Role::Assistant => {
                if let Some(call) = &message.tool_call {
                    let answered = messages
                        .get(index + 1)
                        .and_then(|next| next.tool_call_id.as_deref())
                        == Some(call.id.as_str());

                    if !answered {
                        return Err(HistoryError::UnansweredToolCall {
                            index,
                            tool_call_id: call.id.clone(),
                        });
                    }
                }
            }
            Role::User => {}
        }
    }

    Ok(())
}
