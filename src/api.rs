//! HTTP client for the tracker backend REST API.
//! Three read-only GET operations with JSON bodies; no caching, retry or backoff here.

use crate::config::Config;
use crate::error::ApiError;
use crate::types::{SearchParams, Stats, Transaction};
use anyhow::{anyhow, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const TRANSACTIONS_PATH: &[&str] = &["api", "v1", "transactions"];
const STATS_PATH: &[&str] = &["api", "v1", "stats"];

/// Typed client over `/api/v1/*`
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.api_base_url()?, config.request_timeout)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /api/v1/transactions` with the given filter and paging
    pub async fn get_transactions(&self, params: &SearchParams) -> Result<Vec<Transaction>, ApiError> {
        let url = self.endpoint(TRANSACTIONS_PATH, None)?;
        self.fetch(self.http.get(url.clone()).query(params), &url).await
    }

    /// `GET /api/v1/transactions/{hash}`
    pub async fn get_transaction(&self, hash: &str) -> Result<Transaction, ApiError> {
        let url = self.endpoint(TRANSACTIONS_PATH, Some(hash))?;
        self.fetch(self.http.get(url.clone()), &url).await
    }

    /// `GET /api/v1/stats`
    pub async fn get_stats(&self) -> Result<Stats, ApiError> {
        let url = self.endpoint(STATS_PATH, None)?;
        self.fetch(self.http.get(url.clone()), &url).await
    }

    /// Append path segments to the base URL, keeping any path prefix it already has
    fn endpoint(&self, path: &[&str], last: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(path)
            .extend(last);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<T, ApiError> {
        let url = url.to_string();
        tracing::debug!("GET {}", url);

        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status, url });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}
