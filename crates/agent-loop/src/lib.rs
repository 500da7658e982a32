pub mod config;
pub mod runner;
pub mod stream;

pub use config::{AgentLoopConfig, DEFAULT_SYSTEM_PROMPT};
pub use runner::ConversationOrchestrator;
