// src/api/testing.rs
//! In-memory `MarketApi` with canned responses.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{AnalyzedResult, ApiError, ChatQuery, HealthReport, MarketApi, ResultListItem};

pub struct ScriptedApi {
    upcoming: Mutex<Result<Vec<ResultListItem>, ApiError>>,
    latest: Mutex<Result<Vec<AnalyzedResult>, ApiError>>,
    answers: Mutex<VecDeque<Result<String, ApiError>>>,
    analysis: Mutex<Result<serde_json::Value, ApiError>>,
    health: Mutex<Result<HealthReport, ApiError>>,
    questions: Mutex<Vec<ChatQuery>>,
    tickers: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            upcoming: Mutex::new(Ok(Vec::new())),
            latest: Mutex::new(Ok(Vec::new())),
            answers: Mutex::new(VecDeque::new()),
            analysis: Mutex::new(Ok(serde_json::Value::Null)),
            health: Mutex::new(Ok(HealthReport {
                status: "healthy".into(),
                timestamp: None,
            })),
            questions: Mutex::new(Vec::new()),
            tickers: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: ApiError) -> Self {
        Self::new()
            .with_upcoming(Err(err.clone()))
            .with_latest(Err(err.clone()))
            .with_answer(Err(err.clone()))
            .with_analysis(Err(err.clone()))
            .with_health(Err(err))
    }

    pub fn with_upcoming(self, result: Result<Vec<ResultListItem>, ApiError>) -> Self {
        *self.upcoming.lock().unwrap() = result;
        self
    }

    pub fn with_latest(self, result: Result<Vec<AnalyzedResult>, ApiError>) -> Self {
        *self.latest.lock().unwrap() = result;
        self
    }

    pub fn with_answer(self, result: Result<String, ApiError>) -> Self {
        self.answers.lock().unwrap().push_back(result);
        self
    }

    pub fn with_analysis(self, result: Result<serde_json::Value, ApiError>) -> Self {
        *self.analysis.lock().unwrap() = result;
        self
    }

    pub fn with_health(self, result: Result<HealthReport, ApiError>) -> Self {
        *self.health.lock().unwrap() = result;
        self
    }

    pub fn asked(&self) -> Vec<ChatQuery> {
        self.questions.lock().unwrap().clone()
    }

    pub fn analyzed_tickers(&self) -> Vec<String> {
        self.tickers.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketApi for ScriptedApi {
    async fn upcoming_results(&self) -> Result<Vec<ResultListItem>, ApiError> {
        self.upcoming.lock().unwrap().clone()
    }

    async fn latest_results(&self) -> Result<Vec<AnalyzedResult>, ApiError> {
        self.latest.lock().unwrap().clone()
    }

    async fn ask(&self, query: &ChatQuery) -> Result<String, ApiError> {
        self.questions.lock().unwrap().push(query.clone());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted answer".into())))
    }

    async fn analyze(&self, ticker: &str) -> Result<serde_json::Value, ApiError> {
        self.tickers.lock().unwrap().push(ticker.to_string());
        self.analysis.lock().unwrap().clone()
    }

    async fn health(&self) -> Result<HealthReport, ApiError> {
        self.health.lock().unwrap().clone()
    }
}

pub fn upcoming(name: &str, symbol: &str, date: &str) -> ResultListItem {
    ResultListItem {
        company_name: name.into(),
        company_symbol: symbol.into(),
        sector: None,
        result_date: date.into(),
        quarter: None,
        financial_year: None,
    }
}

pub fn analyzed(name: &str) -> AnalyzedResult {
    AnalyzedResult {
        company_name: name.into(),
        company_symbol: None,
        quarter: None,
        financial_year: None,
        analyzed_at: super::parse_timestamp("2025-01-15T10:30:00").unwrap_or_default(),
        metrics: Default::default(),
        insights: None,
        red_flags: Vec::new(),
        highlights: Vec::new(),
    }
}
