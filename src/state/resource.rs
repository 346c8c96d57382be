// src/state/resource.rs
use chrono::{DateTime, Local};
use tracing::warn;

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Error,
}

/// Loading/error/data lifecycle of one remote list.
#[derive(Debug)]
pub struct ResourceLoader<T> {
    status: LoadStatus,
    data: Vec<T>,
    error_message: Option<String>,
    failure_message: &'static str,
    loaded_at: Option<DateTime<Local>>,
    reload_queued: bool,
}

impl<T> ResourceLoader<T> {
    pub fn new(failure_message: &'static str) -> Self {
        Self {
            status: LoadStatus::Idle,
            data: Vec::new(),
            error_message: None,
            failure_message,
            loaded_at: None,
            reload_queued: false,
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }

    pub fn begin_load(&mut self) {
        self.status = LoadStatus::Loading;
        self.error_message = None;
    }

    /// Applies a fetch result. Success replaces the list wholesale; failure
    /// leaves the previous list untouched.
    pub fn finish_load(&mut self, result: Result<Vec<T>, ApiError>) {
        match result {
            Ok(items) => {
                self.data = items;
                self.status = LoadStatus::Idle;
                self.error_message = None;
                self.loaded_at = Some(Local::now());
            }
            Err(err) => {
                warn!(error = %err, "{}", self.failure_message);
                self.status = LoadStatus::Error;
                self.error_message = Some(self.failure_message.to_string());
            }
        }
    }

    /// Marks the in-flight load as outdated so its completion is followed by
    /// another fetch.
    pub fn queue_reload(&mut self) {
        self.reload_queued = true;
    }

    /// Returns and clears the queued reload flag.
    pub fn take_queued_reload(&mut self) -> bool {
        std::mem::take(&mut self.reload_queued)
    }

    /// Hides the error banner. Does not retry.
    pub fn dismiss_error(&mut self) {
        self.error_message = None;
        if self.status == LoadStatus::Error {
            self.status = LoadStatus::Idle;
        }
    }
}
