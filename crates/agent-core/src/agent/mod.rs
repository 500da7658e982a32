pub mod error;
pub mod events;
pub mod history;
pub mod types;

pub use error::AgentError;
pub use events::AgentEvent;
pub use history::{validate_messages, ConversationHistory, HistoryError};
pub use types::{Message, Role};
