//! Pantry data sources.

use std::future::Future;
use std::path::PathBuf;

use pantrymap_client::{ClientError, PantryClient};
use pantrymap_core::PantryRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to read pantry file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pantry file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can produce the full pantry list.
pub trait PantrySource {
    fn fetch_pantries(&self) -> impl Future<Output = Result<Vec<PantryRecord>, LoadError>>;
}

impl PantrySource for PantryClient {
    async fn fetch_pantries(&self) -> Result<Vec<PantryRecord>, LoadError> {
        Ok(PantryClient::fetch_pantries(self).await?)
    }
}

/// Reads a saved `get_pantry_data` response from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PantrySource for JsonFileSource {
    async fn fetch_pantries(&self) -> Result<Vec<PantryRecord>, LoadError> {
        let path = self.path.display().to_string();
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
        let records: Vec<PantryRecord> =
            serde_json::from_str(&content).map_err(|source| LoadError::Parse { path, source })?;
        tracing::debug!(count = records.len(), path = %self.path.display(), "loaded pantries from file");
        Ok(records)
    }
}
