// src/main.rs
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use khabri_dashboard::api::HttpApiClient;
use khabri_dashboard::{DashboardConfig, KhabriApp};

fn main() -> Result<()> {
    let config_path = DashboardConfig::default_path();
    let config = DashboardConfig::load_from(config_path.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    if let Some(path) = &config_path {
        DashboardConfig::write_default_if_missing(path);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("khabri-io")
        .build()
        .context("Failed to start async runtime")?;

    let api = HttpApiClient::new(&config.api).context("Failed to create API client")?;
    info!(base_url = %config.api.base_url, "starting dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_title("Market Khabri"),
        ..Default::default()
    };

    let toast_duration = config.ui.toast_duration();
    eframe::run_native(
        "Market Khabri",
        options,
        Box::new(move |_cc| Box::new(KhabriApp::new(Arc::new(api), runtime, toast_duration))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
