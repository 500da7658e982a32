use agent_core::config::DEFAULT_MAX_ROUNDS;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful MongoDB query assistant. \
You have access to tools that can:
1. Get table definition
2. Find records by query
3. Ask users for clarification when needed
4. Draw chart
Use these tools to help answer user questions. \
If information is ambiguous, ask for clarification.";

/// Configuration for the conversation loop.
#[derive(Debug, Clone)]
pub struct AgentLoopConfig {
    /// Tool calls allowed while answering one query.
    pub max_rounds: usize,
    /// Sent ahead of the history on every model request; never stored.
    pub system_prompt: String,
}

impl Default for AgentLoopConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}
