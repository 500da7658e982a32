use agent_core::tools::ToolCallDelta;

/// One decoded event of a streamed completion.
#[derive(Debug, Clone, PartialEq)]
pub enum LLMChunk {
    Token(String),
    ToolCalls(Vec<ToolCallDelta>),
    Done,
}
