// src/lib.rs
//! Interaction core of the Market Khabri earnings dashboard: tab state,
//! resource loads, the per-company analysis workflow, toasts and the chat
//! session, driven against the analysis service over HTTP.

pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod runtime;
pub mod state;
pub mod ui;
pub mod utils;

pub use app::KhabriApp;
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
