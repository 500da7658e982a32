use std::path::{Path, PathBuf};

use thiserror::Error;

/// Document listing every table, stored as `tables.yaml`.
pub const TABLE_INDEX: &str = "tables";

#[derive(Error, Debug)]
pub enum SchemaStoreError {
    #[error("Schema document not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid table name: {0:?}")]
    InvalidTableName(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Schema document is empty: {0}")]
    Empty(PathBuf),
}

pub type Result<T> = std::result::Result<T, SchemaStoreError>;

/// Read-only directory of YAML table definitions.
#[derive(Debug, Clone)]
pub struct SchemaStore {
    root: PathBuf,
}

impl SchemaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The table index, re-encoded as pretty-printed JSON.
    pub async fn table_list(&self) -> Result<String> {
        self.read_document(TABLE_INDEX).await
    }

    /// One table definition, re-encoded as pretty-printed JSON.
    pub async fn table_scheme(&self, table_name: &str) -> Result<String> {
        if !is_valid_table_name(table_name) {
            return Err(SchemaStoreError::InvalidTableName(table_name.to_string()));
        }

        self.read_document(table_name).await
    }

    async fn read_document(&self, key: &str) -> Result<String> {
        let path = self.root.join(format!("{key}.yaml"));

        if !tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
        {
            return Err(SchemaStoreError::NotFound(path));
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SchemaStoreError::Io {
                path: path.clone(),
                source,
            })?;

        let parse_error = |source| SchemaStoreError::Parse {
            path: path.clone(),
            source,
        };
        let mut yaml: serde_yaml::Value = serde_yaml::from_str(&content).map_err(parse_error)?;
        yaml.apply_merge().map_err(parse_error)?;
        let value: serde_json::Value = serde_yaml::from_value(yaml).map_err(parse_error)?;

        if value.is_null() {
            return Err(SchemaStoreError::Empty(path));
        }

        Ok(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

fn is_valid_table_name(name: &str) -> bool {
    !name.trim().is_empty()
        && !name.contains("..")
        && !name.contains(['/', '\\'])
}
