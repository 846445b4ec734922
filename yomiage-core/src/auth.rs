//! Service-account key loading.
//!
//! Credentials are loaded once and passed by value to each remote client.
//! Nothing here touches the network; any failure is fatal before the first
//! remote call.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("service account key file not found at '{path}'")]
    KeyFileMissing { path: String },

    #[error("service account key file '{path}' is not valid JSON: {source}")]
    KeyFileInvalid {
        path: String,
        source: serde_json::Error,
    },

    #[error("'{0}' not found in service account key file")]
    MissingField(&'static str),
}

/// Subset of a service-account key file we care about. Unknown fields are
/// ignored so a full key file parses unchanged.
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    project_id: Option<String>,
    api_key: Option<String>,
}

/// Immutable credentials for all remote calls in a run.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub project_id: String,
    pub api_key: String,
}

impl Credentials {
    /// Load credentials from a key file. The API key may live in the key file
    /// or in the `GOOGLE_API_KEY` environment variable.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|_| ConfigError::KeyFileMissing {
            path: path.display().to_string(),
        })?;

        let key: ServiceAccountKey =
            serde_json::from_str(&contents).map_err(|source| ConfigError::KeyFileInvalid {
                path: path.display().to_string(),
                source,
            })?;

        let project_id = key
            .project_id
            .ok_or(ConfigError::MissingField("project_id"))?;

        let api_key = key
            .api_key
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or(ConfigError::MissingField("api_key"))?;

        Ok(Self {
            project_id,
            api_key,
        })
    }
}
