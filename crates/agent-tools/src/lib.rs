//! Tools the assistant can call: schema lookup, record search, charts and
//! clarification questions.
//!
//! [`ToolRegistry`] decodes each call into a [`ToolInvocation`] and runs it
//! against the collaborators it was built with.

pub mod chart;
pub mod declaration;
pub mod prompt;
pub mod records;
mod registry;
pub mod schema_store;
pub mod tools;

pub use chart::{ChartError, ChartRenderer, ChartSpec, SvgChartRenderer};
pub use declaration::{ParamSpec, ParamType, ToolDeclaration};
pub use prompt::{read_line, ConsolePrompt, UserPrompt};
pub use records::{
    Connector, LazyConnection, MongoConnector, MongoRecordStore, RecordStore, RecordStoreError,
};
pub use registry::ToolRegistry;
pub use schema_store::{SchemaStore, SchemaStoreError};
pub use tools::{declarations, ToolInvocation, ToolKind, RECORD_LIMIT};
