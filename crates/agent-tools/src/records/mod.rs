//! Record search over a document database.

mod connection;
mod mongo;

pub use connection::{Connector, LazyConnection};
pub use mongo::{MongoConnector, MongoRecordStore, SERVER_SELECTION_TIMEOUT};

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordStoreError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Query failed: {0}")]
    Query(String),
}

pub type Result<T> = std::result::Result<T, RecordStoreError>;

/// Read access to collections of documents.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Documents in `db_name.table_name` matching `filter`, at most `limit` of them.
    async fn find(
        &self,
        db_name: &str,
        table_name: &str,
        filter: Document,
        limit: usize,
    ) -> Result<Vec<Document>>;
}

/// Serialize documents as a relaxed extended JSON array.
///
/// Database-native values keep their tagged form, e.g. `{"$oid": "..."}`.
pub fn records_to_json(records: Vec<Document>) -> String {
    let array = Bson::Array(records.into_iter().map(Bson::Document).collect());
    array.into_relaxed_extjson().to_string()
}
