// src/api/client.rs
use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{AnalyzedResult, ApiError, ChatQuery, HealthReport, MarketApi, ResultListItem};
use crate::config::ApiConfig;

const USER_AGENT: &str = concat!("khabri-dashboard/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY: usize = 200;

#[derive(Clone)]
pub struct HttpApiClient {
    base_url: Url,
    client: Client,
    upcoming_limit: usize,
    latest_limit: usize,
}

impl fmt::Debug for HttpApiClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HttpApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("upcoming_limit", &self.upcoming_limit)
            .field("latest_limit", &self.latest_limit)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| ApiError::InvalidEndpoint(format!("{}: {err}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidEndpoint(config.base_url.clone()));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| ApiError::Transport(format!("failed to initialize HTTP client: {err}")))?;

        Ok(Self {
            base_url,
            client,
            upcoming_limit: config.upcoming_limit,
            latest_limit: config.latest_limit,
        })
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Transport(format!("failed to read response body: {err}")))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        serde_json::from_str(&body).map_err(|err| ApiError::Malformed(err.to_string()))
    }
}

/// Pulls the `detail` field out of an error body, falling back to the raw text.
fn error_detail(body: &str) -> String {
    if let Ok(ErrorBody { detail }) = serde_json::from_str::<ErrorBody>(body) {
        return match detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        };
    }

    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_ERROR_BODY {
        let cut: String = trimmed.chars().take(MAX_ERROR_BODY).collect();
        format!("{cut}…")
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl MarketApi for HttpApiClient {
    async fn upcoming_results(&self) -> Result<Vec<ResultListItem>, ApiError> {
        let url = self.endpoint(&["upcoming-results"])?;
        debug!(%url, "fetching upcoming results");
        self.execute(self.client.get(url).query(&[("limit", self.upcoming_limit)]))
            .await
    }

    async fn latest_results(&self) -> Result<Vec<AnalyzedResult>, ApiError> {
        let url = self.endpoint(&["latest-results"])?;
        debug!(%url, "fetching latest results");
        self.execute(self.client.get(url).query(&[("limit", self.latest_limit)]))
            .await
    }

    async fn ask(&self, query: &ChatQuery) -> Result<String, ApiError> {
        let url = self.endpoint(&["chat"])?;
        debug!(%url, "posting chat question");
        let reply: ChatReply = self.execute(self.client.post(url).json(query)).await?;
        Ok(reply.response)
    }

    async fn analyze(&self, ticker: &str) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint(&["analyze", ticker])?;
        debug!(%url, "triggering analysis");
        self.execute(self.client.post(url)).await
    }

    async fn health(&self) -> Result<HealthReport, ApiError> {
        let url = self.endpoint(&["health"])?;
        self.execute(self.client.get(url)).await
    }
}
