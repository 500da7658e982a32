use agent_core::ToolOutput;
use serde::Deserialize;

use crate::declaration::{ParamSpec, ParamType, ToolDeclaration};
use crate::schema_store::SchemaStore;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetTableSchemeArgs {
    pub table_name: String,
}

pub(crate) fn declaration() -> ToolDeclaration {
    ToolDeclaration {
        name: "get_table_scheme",
        description: "Fetches the table scheme details",
        parameters: vec![ParamSpec::required(
            "table_name",
            ParamType::String,
            "The table name (e.g., 'mhCollectBg')",
        )],
    }
}

pub(crate) async fn run(store: &SchemaStore, args: &GetTableSchemeArgs) -> ToolOutput {
    match store.table_scheme(&args.table_name).await {
        Ok(content) => ToolOutput::text(content),
        Err(e) => {
            log::warn!("get_table_scheme({}): {}", args.table_name, e);
            ToolOutput::Absent
        }
    }
}
