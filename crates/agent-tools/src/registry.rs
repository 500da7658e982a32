use std::sync::Arc;

use agent_core::tools::executor::Result;
use agent_core::tools::{ToolExecutor, ToolOutput, ToolSchema};
use async_trait::async_trait;

use crate::chart::ChartRenderer;
use crate::declaration::ToolDeclaration;
use crate::prompt::UserPrompt;
use crate::records::RecordStore;
use crate::schema_store::SchemaStore;
use crate::tools::{self, ToolInvocation};

/// Executes the model's tool calls against the external collaborators.
///
/// Collaborator failures never escape: they are logged and reported to the
/// model as an absent result.
pub struct ToolRegistry {
    schema_store: SchemaStore,
    records: Arc<dyn RecordStore>,
    charts: Arc<dyn ChartRenderer>,
    prompt: Arc<dyn UserPrompt>,
}

impl ToolRegistry {
    pub fn new(
        schema_store: SchemaStore,
        records: Arc<dyn RecordStore>,
        charts: Arc<dyn ChartRenderer>,
        prompt: Arc<dyn UserPrompt>,
    ) -> Self {
        Self {
            schema_store,
            records,
            charts,
            prompt,
        }
    }

    pub fn declarations(&self) -> &'static [ToolDeclaration] {
        tools::declarations()
    }

    pub async fn run(&self, invocation: ToolInvocation) -> ToolOutput {
        log::debug!("Running tool {}", invocation.kind().name());

        match invocation {
            ToolInvocation::GetTableList => tools::get_table_list(&self.schema_store).await,
            ToolInvocation::GetTableScheme(args) => {
                tools::get_table_scheme(&self.schema_store, &args).await
            }
            ToolInvocation::FindRecords(args) => {
                tools::find_records(self.records.as_ref(), &args).await
            }
            ToolInvocation::PlotChart(spec) => tools::plot_chart(self.charts.as_ref(), &spec),
            ToolInvocation::AskUserForClarification(args) => {
                tools::ask_user_for_clarification(self.prompt.as_ref(), &args).await
            }
        }
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    async fn execute(&self, tool_name: &str, arguments: serde_json::Value) -> Result<ToolOutput> {
        let invocation = ToolInvocation::decode(tool_name, arguments)?;
        Ok(self.run(invocation).await)
    }

    fn list_tools(&self) -> Vec<ToolSchema> {
        self.declarations()
            .iter()
            .map(ToolDeclaration::to_schema)
            .collect()
    }
}
