use serde::{Deserialize, Serialize};

/// Progress notifications published while a query is being answered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    ToolStart {
        tool_call_id: String,
        tool_name: String,
        arguments: serde_json::Value,
    },

    ToolComplete {
        tool_call_id: String,
        tool_name: String,
        /// `false` when the tool reported the absent-result sentinel.
        found: bool,
    },

    ToolError {
        tool_call_id: String,
        error: String,
    },

    /// The final answer was produced after `rounds` model requests.
    Complete {
        rounds: usize,
    },
}
