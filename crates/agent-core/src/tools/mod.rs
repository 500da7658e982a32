pub mod accumulator;
pub mod args;
pub mod executor;
pub mod types;

pub use accumulator::{ToolCallAccumulator, ToolCallDelta};
pub use args::{parse_tool_args, ArgumentsError};
pub use executor::{ToolError, ToolExecutor};
pub use types::{FunctionCall, FunctionSchema, ToolCall, ToolOutput, ToolSchema, NO_RESULT_SENTINEL};
