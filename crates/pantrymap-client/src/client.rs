//! Typed access to the backend endpoints the pantry map consumes.
//!
//! The backend owns persistence and authentication. This client only reads
//! the pantry list, posts deletions, and builds details-page links. Nothing
//! is retried: a failed load is surfaced to the caller, which decides how the
//! page degrades.

use std::time::Duration;

use pantrymap_core::PantryRecord;
use reqwest::{Client, Url};
use serde::Serialize;

use crate::error::ClientError;

const PANTRY_DATA_PATH: &str = "get_pantry_data";
const DELETE_LOCATION_PATH: &str = "delete-location";

/// Where the browser is sent after a deletion completes.
pub const HOME_PATH: &str = "/";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteLocationBody {
    location_id: i64,
}

pub struct PantryClient {
    client: Client,
    base_url: Url,
}

impl PantryClient {
    /// Creates a client rooted at `base_url` (e.g. `https://pantries.example`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches the full pantry list from `GET /get_pantry_data`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body is not a JSON array of pantries.
    pub async fn fetch_pantries(&self) -> Result<Vec<PantryRecord>, ClientError> {
        let url = self.endpoint(PANTRY_DATA_PATH)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let pantries: Vec<PantryRecord> =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        tracing::debug!(count = pantries.len(), "fetched pantry data");
        Ok(pantries)
    }

    /// Posts `{ "locationId": id }` to `/delete-location`.
    ///
    /// Returns the path to navigate to once the request completes, which is
    /// always [`HOME_PATH`].
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response.
    pub async fn delete_location(&self, location_id: i64) -> Result<&'static str, ClientError> {
        let url = self.endpoint(DELETE_LOCATION_PATH)?;
        let response = self
            .client
            .post(url.clone())
            .json(&DeleteLocationBody { location_id })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        tracing::info!(location_id, "deleted location");
        Ok(HOME_PATH)
    }

    /// Absolute URL of a pantry's details page.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if the join fails.
    pub fn details_url(&self, location_id: i64) -> Result<Url, ClientError> {
        self.endpoint(&format!("location/{location_id}"))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
