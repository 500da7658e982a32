use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "db-agent.toml";
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";
pub const DEFAULT_MAX_ROUNDS: usize = 25;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: String,
    pub mongodb_url: Option<String>,
    pub schema_dir: PathBuf,
    pub chart_dir: PathBuf,
    pub max_rounds: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: None,
            model: DEFAULT_MODEL.to_string(),
            mongodb_url: None,
            schema_dir: PathBuf::from("scheme"),
            chart_dir: std::env::temp_dir().join("db-agent-charts"),
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl AppConfig {
    /// Loads the config file, then applies environment overrides.
    ///
    /// An explicit `path` must exist; without one, `db-agent.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `MODEL`, `MONGODB_URL`,
    /// `SCHEMA_DIR`, `CHART_DIR` and `MAX_TOOL_ROUNDS` from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = lookup("OPENAI_API_KEY") {
            self.api_key = Some(api_key);
        }
        if let Some(api_base) = lookup("OPENAI_BASE_URL") {
            self.api_base = Some(api_base);
        }
        if let Some(model) = lookup("MODEL") {
            self.model = model;
        }
        if let Some(mongodb_url) = lookup("MONGODB_URL") {
            self.mongodb_url = Some(mongodb_url);
        }
        if let Some(schema_dir) = lookup("SCHEMA_DIR") {
            self.schema_dir = PathBuf::from(schema_dir);
        }
        if let Some(chart_dir) = lookup("CHART_DIR") {
            self.chart_dir = PathBuf::from(chart_dir);
        }
        if let Some(max_rounds) = lookup("MAX_TOOL_ROUNDS") {
            self.max_rounds = parse_max_rounds(&max_rounds)?;
        }

        Ok(())
    }
}

fn parse_max_rounds(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(rounds) if rounds > 0 => Ok(rounds),
        _ => Err(ConfigError::InvalidValue {
            key: "MAX_TOOL_ROUNDS",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_are_gpt4_turbo_with_25_rounds() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gpt-4-turbo-preview");
        assert_eq!(config.max_rounds, 25);
        assert_eq!(config.schema_dir, PathBuf::from("scheme"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn file_values_fill_missing_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"gpt-4o\"\nmongodb_url = \"mongodb://localhost:27017\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.mongodb_url.as_deref(), Some("mongodb://localhost:27017"));
        assert_eq!(config.max_rounds, 25);
    }

    #[test]
    fn invalid_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_rounds = \"many\"").unwrap();

        let error = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let error = AppConfig::load(Some(Path::new("/nonexistent/db-agent.toml"))).unwrap_err();
        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn environment_overrides_file_values() {
        let vars = env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("MODEL", "gpt-4o-mini"),
            ("SCHEMA_DIR", "/srv/scheme"),
            ("MAX_TOOL_ROUNDS", "8"),
            ("MONGODB_URL", "  "),
        ]);
        let mut config = AppConfig::default();

        config.apply_overrides(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.schema_dir, PathBuf::from("/srv/scheme"));
        assert_eq!(config.max_rounds, 8);
        assert!(config.mongodb_url.is_none());
    }

    #[test]
    fn zero_max_rounds_is_rejected() {
        let vars = env(&[("MAX_TOOL_ROUNDS", "0")]);
        let mut config = AppConfig::default();

        let error = config.apply_overrides(|key| vars.get(key).cloned()).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidValue { key: "MAX_TOOL_ROUNDS", .. }));
    }
}
