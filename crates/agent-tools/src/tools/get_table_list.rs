use agent_core::ToolOutput;

use crate::declaration::ToolDeclaration;
use crate::schema_store::SchemaStore;

pub(crate) fn declaration() -> ToolDeclaration {
    ToolDeclaration {
        name: "get_table_list",
        description: "Fetches the current table definitions",
        parameters: Vec::new(),
    }
}

pub(crate) async fn run(store: &SchemaStore) -> ToolOutput {
    match store.table_list().await {
        Ok(content) => ToolOutput::text(content),
        Err(e) => {
            log::warn!("get_table_list: {}", e);
            ToolOutput::Absent
        }
    }
}
