use futures::StreamExt;

use agent_core::tools::{ToolCall, ToolCallAccumulator};
use agent_core::AgentError;
use agent_llm::{LLMChunk, LLMStream};

pub struct StreamHandlingOutput {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

/// Drain one completion stream into its text and finished tool calls.
pub async fn consume_llm_stream(mut stream: LLMStream) -> Result<StreamHandlingOutput, AgentError> {
    let mut content = String::new();
    let mut tool_calls = ToolCallAccumulator::new();

    while let Some(chunk_result) = stream.next().await {
        match chunk_result {
            Ok(LLMChunk::Token(token)) => content.push_str(&token),
            Ok(LLMChunk::ToolCalls(partial_calls)) => {
                log::debug!("Received {} tool call parts", partial_calls.len());
                tool_calls.extend(partial_calls);
            }
            Ok(LLMChunk::Done) => {
                log::debug!("LLM stream completed");
            }
            Err(error) => {
                log::error!("Stream error: {}", error);
                return Err(AgentError::ModelUnavailable(error.to_string()));
            }
        }
    }

    Ok(StreamHandlingOutput {
        content,
        tool_calls: tool_calls.finalize(),
    })
}
