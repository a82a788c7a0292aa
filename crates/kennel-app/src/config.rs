//! Configuration for the kennel binary

use std::path::{Path, PathBuf};
use std::time::Duration;

use kennel_adapter::{MongoSettings, DEFAULT_CONNECT_TIMEOUT, DEFAULT_OPERATION_TIMEOUT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Store endpoint and time bounds.
///
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KennelConfig {
    /// MongoDB connection string
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// Bound for connecting and pinging at startup
    pub connect_timeout_secs: u64,
    /// Bound for each create / get / list call
    pub operation_timeout_secs: u64,
}

impl Default for KennelConfig {
    fn default() -> Self {
        let mongo = MongoSettings::default();
        Self {
            uri: mongo.uri,
            database: mongo.database,
            collection: mongo.collection,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT.as_secs(),
            operation_timeout_secs: DEFAULT_OPERATION_TIMEOUT.as_secs(),
        }
    }
}

impl KennelConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uri.trim().is_empty() {
            return Err(ConfigError::Invalid("uri must not be empty".to_string()));
        }
        if self.database.trim().is_empty() || self.collection.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "database and collection must not be empty".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 || self.operation_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeouts must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn mongo_settings(&self) -> MongoSettings {
        MongoSettings {
            uri: self.uri.clone(),
            database: self.database.clone(),
            collection: self.collection.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }
}
