use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Malformed arguments for tool {tool}: {reason}")]
    MalformedToolArguments { tool: String, reason: String },

    #[error("Stopped after {0} tool calls without a final answer")]
    TooManyToolCalls(usize),

    #[error("Query is empty")]
    EmptyQuery,
}
