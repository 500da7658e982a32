//! The tool catalog offered to the model and typed decoding of its calls.

mod ask_user;
mod find_records;
mod get_table_list;
mod get_table_scheme;
mod plot_chart;

use std::sync::OnceLock;

use agent_core::ToolError;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::chart::ChartSpec;
use crate::declaration::ToolDeclaration;

pub use ask_user::ClarificationArgs;
pub use find_records::{FindRecordsArgs, QueryFilter, RECORD_LIMIT};
pub use get_table_scheme::GetTableSchemeArgs;

pub(crate) use ask_user::run as ask_user_for_clarification;
pub(crate) use find_records::run as find_records;
pub(crate) use get_table_list::run as get_table_list;
pub(crate) use get_table_scheme::run as get_table_scheme;
pub(crate) use plot_chart::run as plot_chart;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    GetTableList,
    GetTableScheme,
    FindRecords,
    PlotChart,
    AskUserForClarification,
}

impl ToolKind {
    /// Catalog order.
    pub const ALL: [ToolKind; 5] = [
        ToolKind::GetTableList,
        ToolKind::GetTableScheme,
        ToolKind::FindRecords,
        ToolKind::PlotChart,
        ToolKind::AskUserForClarification,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::GetTableList => "get_table_list",
            ToolKind::GetTableScheme => "get_table_scheme",
            ToolKind::FindRecords => "find_records",
            ToolKind::PlotChart => "plot_chart",
            ToolKind::AskUserForClarification => "ask_user_for_clarification",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn declaration(self) -> &'static ToolDeclaration {
        &declarations()[self as usize]
    }

    fn build_declaration(self) -> ToolDeclaration {
        match self {
            ToolKind::GetTableList => get_table_list::declaration(),
            ToolKind::GetTableScheme => get_table_scheme::declaration(),
            ToolKind::FindRecords => find_records::declaration(),
            ToolKind::PlotChart => plot_chart::declaration(),
            ToolKind::AskUserForClarification => ask_user::declaration(),
        }
    }
}

/// Every tool declaration, in [`ToolKind::ALL`] order.
pub fn declarations() -> &'static [ToolDeclaration] {
    static DECLARATIONS: OnceLock<Vec<ToolDeclaration>> = OnceLock::new();
    DECLARATIONS.get_or_init(|| {
        ToolKind::ALL
            .into_iter()
            .map(ToolKind::build_declaration)
            .collect()
    })
}

/// A decoded tool call, ready to run.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInvocation {
    GetTableList,
    GetTableScheme(GetTableSchemeArgs),
    FindRecords(FindRecordsArgs),
    PlotChart(ChartSpec),
    AskUserForClarification(ClarificationArgs),
}

impl ToolInvocation {
    /// Decode the model's arguments for `tool_name`.
    ///
    /// Required arguments are checked against the declaration before the
    /// typed decode, so a missing one is reported by name.
    pub fn decode(tool_name: &str, arguments: Value) -> Result<Self, ToolError> {
        let kind = ToolKind::from_name(tool_name)
            .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

        check_required(kind, &arguments)?;

        Ok(match kind {
            ToolKind::GetTableList => Self::GetTableList,
            ToolKind::GetTableScheme => Self::GetTableScheme(typed(kind, arguments)?),
            ToolKind::FindRecords => Self::FindRecords(typed(kind, arguments)?),
            ToolKind::PlotChart => Self::PlotChart(typed(kind, arguments)?),
            ToolKind::AskUserForClarification => {
                Self::AskUserForClarification(typed(kind, arguments)?)
            }
        })
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::GetTableList => ToolKind::GetTableList,
            Self::GetTableScheme(_) => ToolKind::GetTableScheme,
            Self::FindRecords(_) => ToolKind::FindRecords,
            Self::PlotChart(_) => ToolKind::PlotChart,
            Self::AskUserForClarification(_) => ToolKind::AskUserForClarification,
        }
    }
}

fn check_required(kind: ToolKind, arguments: &Value) -> Result<(), ToolError> {
    let object = arguments.as_object();

    for name in kind.declaration().required_parameters() {
        let present = object
            .and_then(|object| object.get(name))
            .is_some_and(|value| !value.is_null());
        if !present {
            return Err(ToolError::InvalidArguments {
                tool: kind.name().to_string(),
                reason: format!("missing required argument `{name}`"),
            });
        }
    }

    Ok(())
}

fn typed<T: DeserializeOwned>(kind: ToolKind, arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: kind.name().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn catalog_order_and_names() {
        let names: Vec<_> = declarations().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "get_table_list",
                "get_table_scheme",
                "find_records",
                "plot_chart",
                "ask_user_for_clarification",
            ]
        );

        for kind in ToolKind::ALL {
            assert_eq!(kind.declaration().name, kind.name());
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn declarations_are_built_once() {
        assert!(std::ptr::eq(declarations(), declarations()));
    }

    #[test]
    fn unknown_tool_is_reported() {
        let error = ToolInvocation::decode("drop_collection", json!({})).unwrap_err();
        assert_eq!(error, ToolError::UnknownTool("drop_collection".to_string()));
    }

    #[test]
    fn decodes_each_tool() {
        assert_eq!(
            ToolInvocation::decode("get_table_list", json!({})).unwrap(),
            ToolInvocation::GetTableList
        );
        assert_eq!(
            ToolInvocation::decode("get_table_scheme", json!({"table_name": "users"})).unwrap(),
            ToolInvocation::GetTableScheme(GetTableSchemeArgs {
                table_name: "users".to_string()
            })
        );

        let find = ToolInvocation::decode(
            "find_records",
            json!({
                "db_name": "mhCollect",
                "table_name": "mhCollectBg",
                "query": "{ \"appUserId\": 4 }"
            }),
        )
        .unwrap();
        assert_eq!(find.kind(), ToolKind::FindRecords);

        let chart = ToolInvocation::decode(
            "plot_chart",
            json!({"title": "t", "xlabel": "x", "ylabel": "y", "x": [1, 2], "y": [3.5, 4]}),
        )
        .unwrap();
        match chart {
            ToolInvocation::PlotChart(spec) => {
                assert_eq!(spec.x, vec![1.0, 2.0]);
                assert_eq!(spec.y, vec![3.5, 4.0]);
            }
            other => panic!("expected PlotChart, got {other:?}"),
        }

        assert_eq!(
            ToolInvocation::decode(
                "ask_user_for_clarification",
                json!({"question_to_user": "Which database?"})
            )
            .unwrap(),
            ToolInvocation::AskUserForClarification(ClarificationArgs {
                question_to_user: "Which database?".to_string()
            })
        );
    }

    #[test]
    fn missing_required_argument_is_named() {
        let error = ToolInvocation::decode(
            "find_records",
            json!({"db_name": "mhCollect", "query": "{}"}),
        )
        .unwrap_err();

        assert_eq!(
            error,
            ToolError::InvalidArguments {
                tool: "find_records".to_string(),
                reason: "missing required argument `table_name`".to_string(),
            }
        );
    }

    #[test]
    fn null_counts_as_missing() {
        let error =
            ToolInvocation::decode("get_table_scheme", json!({"table_name": null})).unwrap_err();
        assert!(matches!(error, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn ill_typed_argument_is_invalid() {
        let error = ToolInvocation::decode(
            "plot_chart",
            json!({"title": "t", "xlabel": "x", "ylabel": "y", "x": "1,2", "y": [1, 2]}),
        )
        .unwrap_err();

        match error {
            ToolError::InvalidArguments { tool, .. } => assert_eq!(tool, "plot_chart"),
            other => panic!("expected InvalidArguments, got {other:?}"),
        }
    }
}
