//! API client for the cyoa content service.
//!
//! The game data is fetched with a single GET. There is no retry: a failed
//! request is reported to the caller, which falls back to the local store.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use crate::models::GameData;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Game data endpoint of the content service
pub const DEFAULT_API_URI: &str = "https://animechicago-cyoa-content.herokuapp.com/game/data";

/// Anything that can produce the game data document.
#[async_trait]
pub trait GameDataSource: Send + Sync {
    async fn fetch_game_data(&self) -> Result<GameData, ApiError>;
}

/// API client for the content service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    api_uri: String,
}

impl ApiClient {
    /// Create a client with no request deadline beyond the transport's own
    pub fn new(api_uri: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_uri, None)
    }

    pub fn with_timeout(api_uri: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_uri: api_uri.into(),
        })
    }

    pub fn api_uri(&self) -> &str {
        &self.api_uri
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }
}

#[async_trait]
impl GameDataSource for ApiClient {
    async fn fetch_game_data(&self) -> Result<GameData, ApiError> {
        debug!(url = %self.api_uri, "Fetching game data");

        let response = self
            .client
            .get(&self.api_uri)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let response = Self::check_response(response).await?;
        let body = response.text().await?;
        let data: GameData = serde_json::from_str(&body)?;

        debug!(bytes = body.len(), "Game data received");
        Ok(data)
    }
}
