use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::Client;

use super::connection::{Connector, LazyConnection};
use super::{RecordStore, RecordStoreError, Result};

pub const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(10);

const APP_NAME: &str = "db-agent";

pub struct MongoConnector {
    url: String,
    server_selection_timeout: Duration,
}

impl MongoConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            server_selection_timeout: SERVER_SELECTION_TIMEOUT,
        }
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout = timeout;
        self
    }
}

#[async_trait]
impl Connector for MongoConnector {
    type Connection = Client;

    async fn connect(&self) -> Result<Client> {
        let mut options = ClientOptions::parse(&self.url)
            .await
            .map_err(|e| RecordStoreError::Connection(e.to_string()))?;
        options.server_selection_timeout = Some(self.server_selection_timeout);
        options.app_name = Some(APP_NAME.to_string());

        let client =
            Client::with_options(options).map_err(|e| RecordStoreError::Connection(e.to_string()))?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| RecordStoreError::Connection(e.to_string()))?;

        log::info!("Connected to MongoDB");
        Ok(client)
    }
}

/// MongoDB-backed [`RecordStore`]. Connects on the first query.
pub struct MongoRecordStore {
    connection: LazyConnection<MongoConnector>,
}

impl MongoRecordStore {
    pub fn new(connector: MongoConnector) -> Self {
        Self {
            connection: LazyConnection::new(connector),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }
}

#[async_trait]
impl RecordStore for MongoRecordStore {
    async fn find(
        &self,
        db_name: &str,
        table_name: &str,
        filter: Document,
        limit: usize,
    ) -> Result<Vec<Document>> {
        let client = self.connection.get().await?;
        let collection = client.database(db_name).collection::<Document>(table_name);

        let mut options = FindOptions::default();
        options.limit = Some(i64::try_from(limit).unwrap_or(i64::MAX));

        log::debug!("find on {}.{}: {}", db_name, table_name, filter);

        let cursor = collection
            .find(filter, options)
            .await
            .map_err(|e| RecordStoreError::Query(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| RecordStoreError::Query(e.to_string()))
    }
}
