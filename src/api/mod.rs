// src/api/mod.rs
//! Typed boundary to the earnings analysis service.
//!
//! Every remote operation exists twice: a typed form returning
//! `Result<_, ApiError>` and a safe-default form that absorbs the failure,
//! logs it, and hands the caller something displayable.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

pub mod client;
#[cfg(test)]
pub mod testing;

pub use client::HttpApiClient;

/// Shown in place of a chat answer when the service cannot be reached.
pub const CHAT_FALLBACK: &str = "Sorry, I couldn't get an answer right now. Please try again.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("invalid service endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("unexpected response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// The cause without the category prefix, suitable for user-facing text.
    pub fn detail(&self) -> &str {
        match self {
            ApiError::InvalidEndpoint(detail)
            | ApiError::Transport(detail)
            | ApiError::Malformed(detail) => detail,
            ApiError::Status { detail, .. } => detail,
        }
    }
}

// Upcoming result announcement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultListItem {
    pub company_name: String,
    pub company_symbol: String,
    #[serde(default)]
    pub sector: Option<String>,
    pub result_date: String,
    #[serde(default)]
    pub quarter: Option<String>,
    #[serde(default)]
    pub financial_year: Option<String>,
}

impl ResultListItem {
    pub fn card_label(&self) -> String {
        format!("{} / {} / {}", self.company_name, self.company_symbol, self.result_date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    #[serde(default)]
    pub revenue: Option<f64>,
    #[serde(default)]
    pub profit_after_tax: Option<f64>,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default)]
    pub operating_margin: Option<f64>,
    #[serde(default)]
    pub yoy_growth: Option<f64>,
    #[serde(default)]
    pub qoq_growth: Option<f64>,
}

// Snapshot produced by the analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedResult {
    pub company_name: String,
    #[serde(default)]
    pub company_symbol: Option<String>,
    #[serde(default)]
    pub quarter: Option<String>,
    #[serde(default)]
    pub financial_year: Option<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub analyzed_at: NaiveDateTime,
    #[serde(default)]
    pub metrics: FinancialMetrics,
    #[serde(default)]
    pub insights: Option<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// Accepts RFC 3339 as well as the naive ISO-8601 form the service emits.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.naive_utc());
    }
    raw.parse::<NaiveDateTime>().ok()
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatQuery {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_symbol: Option<String>,
}

impl ChatQuery {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            company_symbol: None,
        }
    }

    pub fn about(mut self, company_symbol: Option<String>) -> Self {
        self.company_symbol = company_symbol;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Tagged result of an analysis trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisOutcome {
    Success { data: serde_json::Value },
    Error { error: String },
}

impl AnalysisOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success { .. })
    }
}

#[async_trait]
pub trait MarketApi: Send + Sync {
    async fn upcoming_results(&self) -> Result<Vec<ResultListItem>, ApiError>;
    async fn latest_results(&self) -> Result<Vec<AnalyzedResult>, ApiError>;
    async fn ask(&self, query: &ChatQuery) -> Result<String, ApiError>;
    async fn analyze(&self, ticker: &str) -> Result<serde_json::Value, ApiError>;
    async fn health(&self) -> Result<HealthReport, ApiError>;

    async fn fetch_upcoming(&self) -> Vec<ResultListItem> {
        match self.upcoming_results().await {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "failed to fetch upcoming results");
                Vec::new()
            }
        }
    }

    async fn fetch_latest(&self) -> Vec<AnalyzedResult> {
        match self.latest_results().await {
            Ok(results) => results,
            Err(err) => {
                warn!(error = %err, "failed to fetch latest results");
                Vec::new()
            }
        }
    }

    async fn send_chat(&self, question: &str) -> String {
        self.send_chat_query(&ChatQuery::new(question)).await
    }

    async fn send_chat_query(&self, query: &ChatQuery) -> String {
        match self.ask(query).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(error = %err, "chat request failed");
                CHAT_FALLBACK.to_string()
            }
        }
    }

    async fn trigger_analysis(&self, company: &str, ticker: &str) -> AnalysisOutcome {
        match self.analyze(ticker).await {
            Ok(data) => AnalysisOutcome::Success { data },
            Err(err) => {
                warn!(company, ticker, error = %err, "analysis request failed");
                AnalysisOutcome::Error {
                    error: err.detail().to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedApi;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analyzed_result_accepts_naive_timestamp_and_sparse_metrics() {
        let raw = json!({
            "company_name": "Wipro",
            "analyzed_at": "2025-01-15T10:30:00.123456",
            "metrics": { "revenue": 22319.0, "eps": null }
        });

        let result: AnalyzedResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.metrics.revenue, Some(22319.0));
        assert_eq!(result.metrics.eps, None);
        assert_eq!(result.insights, None);
        assert!(result.red_flags.is_empty());
        assert_eq!(result.analyzed_at.format("%Y-%m-%d %H:%M").to_string(), "2025-01-15 10:30");
    }

    #[test]
    fn test_parse_timestamp_accepts_rfc3339() {
        let stamp = parse_timestamp("2025-01-15T10:30:00+05:30").unwrap();
        assert_eq!(stamp.format("%H:%M").to_string(), "05:00");
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_analysis_outcome_is_tagged_by_status() {
        let success = AnalysisOutcome::Success { data: json!({"ok": true}) };
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            json!({"status": "success", "data": {"ok": true}})
        );

        let error: AnalysisOutcome =
            serde_json::from_value(json!({"status": "error", "error": "timeout"})).unwrap();
        assert_eq!(error, AnalysisOutcome::Error { error: "timeout".into() });
    }

    #[test]
    fn test_chat_query_omits_absent_symbol() {
        let body = serde_json::to_value(ChatQuery::new("How did Wipro perform?")).unwrap();
        assert_eq!(body, json!({"question": "How did Wipro perform?"}));
    }

    #[tokio::test]
    async fn test_safe_defaults_absorb_failures() {
        let api = ScriptedApi::failing(ApiError::Transport("connection refused".into()));

        assert!(api.fetch_upcoming().await.is_empty());
        assert!(api.fetch_latest().await.is_empty());
        assert_eq!(api.send_chat("hello").await, CHAT_FALLBACK);
        assert_eq!(
            api.trigger_analysis("Wipro", "WIPRO").await,
            AnalysisOutcome::Error { error: "connection refused".into() }
        );
    }

    #[tokio::test]
    async fn test_trigger_analysis_wraps_payload() {
        let api = ScriptedApi::new().with_analysis(Ok(json!({"company_symbol": "WIPRO"})));

        let outcome = api.trigger_analysis("Wipro", "WIPRO").await;
        assert!(outcome.is_success());
        assert_eq!(api.analyzed_tickers(), vec!["WIPRO".to_string()]);
    }
}
