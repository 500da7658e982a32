use async_trait::async_trait;
use thiserror::Error;

use crate::tools::{ToolOutput, ToolSchema};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error("Execution failed: {0}")]
    Execution(String),
}

pub type Result<T> = std::result::Result<T, ToolError>;

/// The capability the conversation loop dispatches tool calls through.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, tool_name: &str, arguments: serde_json::Value) -> Result<ToolOutput>;
    fn list_tools(&self) -> Vec<ToolSchema>;
}
