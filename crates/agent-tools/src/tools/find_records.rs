use agent_core::ToolOutput;
use mongodb::bson::Document;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::declaration::{ParamSpec, ParamType, ToolDeclaration};
use crate::records::{records_to_json, RecordStore, RecordStoreError};

/// Most documents returned by one `find_records` call.
pub const RECORD_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FindRecordsArgs {
    pub db_name: String,
    pub table_name: String,
    pub query: QueryFilter,
}

/// A filter as sent by the model: usually a JSON string, sometimes an object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QueryFilter {
    Json(String),
    Document(Map<String, Value>),
}

impl QueryFilter {
    /// Parse as MongoDB extended JSON. A blank string matches everything.
    pub fn to_document(&self) -> Result<Document, RecordStoreError> {
        let map = match self {
            QueryFilter::Json(text) if text.trim().is_empty() => Map::new(),
            QueryFilter::Json(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Object(map)) => map,
                Ok(other) => {
                    return Err(RecordStoreError::InvalidQuery(format!(
                        "expected a JSON object, got {other}"
                    )))
                }
                Err(e) => return Err(RecordStoreError::InvalidQuery(e.to_string())),
            },
            QueryFilter::Document(map) => map.clone(),
        };

        Document::try_from(map).map_err(|e| RecordStoreError::InvalidQuery(e.to_string()))
    }
}

pub(crate) fn declaration() -> ToolDeclaration {
    ToolDeclaration {
        name: "find_records",
        description: "Find records by query",
        parameters: vec![
            ParamSpec::required(
                "db_name",
                ParamType::String,
                "The database name (e.g., 'mhCollect')",
            ),
            ParamSpec::required(
                "table_name",
                ParamType::String,
                "The collection name (e.g., 'mhCollectBg')",
            ),
            ParamSpec::required(
                "query",
                ParamType::String,
                "MongoDB query as JSON string (e.g., \"{ \\\"appUserId\\\": 4 }\")",
            ),
        ],
    }
}

pub(crate) async fn run(store: &dyn RecordStore, args: &FindRecordsArgs) -> ToolOutput {
    let result = match args.query.to_document() {
        Ok(filter) => {
            store
                .find(&args.db_name, &args.table_name, filter, RECORD_LIMIT)
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(records) if records.is_empty() => ToolOutput::Absent,
        Ok(mut records) => {
            records.truncate(RECORD_LIMIT);
            ToolOutput::text(records_to_json(records))
        }
        Err(e) => {
            log::warn!(
                "find_records({}.{}): {}",
                args.db_name,
                args.table_name,
                e
            );
            ToolOutput::Absent
        }
    }
}
