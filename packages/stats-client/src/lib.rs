//! HTTP client for the statistics service.
//!
//! The statistics service records endpoint hits and answers aggregate view
//! counts per URI. This crate only speaks the wire protocol; the server wraps
//! it behind a trait so the rest of the application never touches HTTP.

pub mod models;

use reqwest::Client;

use crate::models::ViewStats;

#[derive(Debug, Clone)]
pub struct StatsClientOptions {
    /// Base URL of the statistics service, e.g. `http://stats:9090`.
    pub base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("request to statistics service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("statistics service returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Clone)]
pub struct StatsClient {
    options: StatsClientOptions,
    http: Client,
}

impl StatsClient {
    pub fn new(options: StatsClientOptions) -> Self {
        Self {
            options,
            http: Client::new(),
        }
    }

    /// Fetch hit counts for a set of URIs.
    ///
    /// URIs absent from the response have never been viewed; callers should
    /// treat them as zero.
    pub async fn hit_counts(&self, uris: &[String]) -> Result<Vec<ViewStats>, StatsError> {
        let url = format!("{}/stats", self.options.base_url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .query(&[("uris", uris.join(","))])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Status(status));
        }

        Ok(response.json::<Vec<ViewStats>>().await?)
    }
}
