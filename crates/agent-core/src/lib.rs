pub mod agent;
pub mod config;
pub mod tools;

pub use agent::{AgentError, AgentEvent, ConversationHistory, HistoryError, Message, Role};
pub use config::{AppConfig, ConfigError};
pub use tools::{
    parse_tool_args, ArgumentsError, FunctionCall, FunctionSchema, ToolCall, ToolCallAccumulator,
    ToolCallDelta, ToolError, ToolExecutor, ToolOutput, ToolSchema, NO_RESULT_SENTINEL,
};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
