// src/state/mod.rs
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::api::{AnalysisOutcome, AnalyzedResult, ApiError, ChatQuery, HealthReport, ResultListItem};

pub mod chat;
pub mod processing;
pub mod resource;
pub mod tabs;
pub mod toast;

pub use chat::{ChatSession, ChatTurn, PendingReply, Role, TurnId, THINKING_PLACEHOLDER};
pub use processing::{ProcessingReport, ProcessingWorkflow};
pub use resource::{LoadStatus, ResourceLoader};
pub use tabs::{ResourceKey, Tab, TabController};
pub use toast::{NotificationToast, Toast, ToastId};

pub const UPCOMING_LOAD_ERROR: &str = "Failed to fetch upcoming results";
pub const LATEST_LOAD_ERROR: &str = "Failed to fetch latest results";

/// Work the state container asks the runtime to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(ResourceKey),
    Analyze { company: String, ticker: String },
    Chat { turn: TurnId, query: ChatQuery },
    DismissToastAfter { id: ToastId, after: Duration },
    CheckHealth,
}

/// Completion of a suspended operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    UpcomingLoaded(Result<Vec<ResultListItem>, ApiError>),
    LatestLoaded(Result<Vec<AnalyzedResult>, ApiError>),
    AnalysisFinished { company: String, outcome: AnalysisOutcome },
    ChatAnswered { turn: TurnId, answer: String },
    ToastExpired(ToastId),
    HealthChecked(Result<HealthReport, ApiError>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendStatus {
    Unknown,
    Online { checked_at: DateTime<Local> },
    Offline(String),
}

// Core application state
#[derive(Debug)]
pub struct DashboardState {
    pub tabs: TabController,
    pub upcoming: ResourceLoader<ResultListItem>,
    pub latest: ResourceLoader<AnalyzedResult>,
    pub processing: ProcessingWorkflow,
    pub chat: ChatSession,
    pub chat_input: String,
    pub chat_focus: Option<String>,
    pub toast: NotificationToast,
    pub backend: BackendStatus,
}

impl DashboardState {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            tabs: TabController::default(),
            upcoming: ResourceLoader::new(UPCOMING_LOAD_ERROR),
            latest: ResourceLoader::new(LATEST_LOAD_ERROR),
            processing: ProcessingWorkflow::default(),
            chat: ChatSession::default(),
            chat_input: String::new(),
            chat_focus: None,
            toast: NotificationToast::new(toast_duration),
            backend: BackendStatus::Unknown,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.tabs.active()
    }

    /// Initial effects: health probe plus the load for the starting tab.
    pub fn start(&mut self) -> Vec<Command> {
        let mut commands = vec![Command::CheckHealth];
        if let Some(key) = self.active_tab().resource() {
            commands.extend(self.load(key));
        }
        commands
    }

    pub fn select_tab(&mut self, tab: Tab) -> Vec<Command> {
        debug!(?tab, "tab selected");
        match self.tabs.select(tab) {
            Some(key) => self.load(key).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Reloads the active tab's resource, if it has one.
    pub fn refresh(&mut self) -> Vec<Command> {
        match self.active_tab().resource() {
            Some(key) => self.load(key).into_iter().collect(),
            None => Vec::new(),
        }
    }

    pub fn loader_status(&self, key: ResourceKey) -> LoadStatus {
        match key {
            ResourceKey::Upcoming => self.upcoming.status(),
            ResourceKey::Latest => self.latest.status(),
        }
    }

    pub fn load_error(&self, key: ResourceKey) -> Option<&str> {
        match key {
            ResourceKey::Upcoming => self.upcoming.error_message(),
            ResourceKey::Latest => self.latest.error_message(),
        }
    }

    pub fn dismiss_error(&mut self, key: ResourceKey) {
        match key {
            ResourceKey::Upcoming => self.upcoming.dismiss_error(),
            ResourceKey::Latest => self.latest.dismiss_error(),
        }
    }

    fn load(&mut self, key: ResourceKey) -> Option<Command> {
        if self.loader_status(key) == LoadStatus::Loading {
            debug!(?key, "load already in flight");
            return None;
        }
        match key {
            ResourceKey::Upcoming => self.upcoming.begin_load(),
            ResourceKey::Latest => self.latest.begin_load(),
        }
        Some(Command::Load(key))
    }

    /// Like `load`, but a load already in flight is followed by a fresh one
    /// once it completes.
    fn reload(&mut self, key: ResourceKey) -> Option<Command> {
        if self.loader_status(key) != LoadStatus::Loading {
            return self.load(key);
        }
        debug!(?key, "reload queued behind in-flight load");
        match key {
            ResourceKey::Upcoming => self.upcoming.queue_reload(),
            ResourceKey::Latest => self.latest.queue_reload(),
        }
        None
    }

    fn follow_queued_reload(&mut self, key: ResourceKey) -> Vec<Command> {
        let queued = match key {
            ResourceKey::Upcoming => self.upcoming.take_queued_reload(),
            ResourceKey::Latest => self.latest.take_queued_reload(),
        };
        if queued {
            self.load(key).into_iter().collect()
        } else {
            Vec::new()
        }
    }

    pub fn process(&mut self, company: &str, ticker: &str) -> Vec<Command> {
        info!(company, ticker, "analysis requested");
        self.processing.begin(company);
        vec![Command::Analyze {
            company: company.to_string(),
            ticker: ticker.to_string(),
        }]
    }

    /// Submits the contents of the chat input. Blank input is ignored and
    /// left in place.
    pub fn submit_chat(&mut self) -> Vec<Command> {
        let Some(PendingReply { turn, question }) = self.chat.submit(&self.chat_input) else {
            return Vec::new();
        };
        self.chat_input.clear();

        vec![Command::Chat {
            turn,
            query: ChatQuery::new(question).about(self.chat_focus.clone()),
        }]
    }

    /// Scopes following chat questions to one company and opens the chat tab.
    pub fn ask_about(&mut self, company_symbol: &str) -> Vec<Command> {
        self.chat_focus = Some(company_symbol.to_string());
        self.select_tab(Tab::Chat)
    }

    pub fn clear_focus(&mut self) {
        self.chat_focus = None;
    }

    pub fn show_toast(&mut self, message: impl Into<String>) -> Command {
        let id = self.toast.show(message, Instant::now());
        Command::DismissToastAfter {
            id,
            after: self.toast.duration(),
        }
    }

    pub fn apply(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::UpcomingLoaded(result) => {
                self.upcoming.finish_load(result);
                self.follow_queued_reload(ResourceKey::Upcoming)
            }
            Event::LatestLoaded(result) => {
                self.latest.finish_load(result);
                self.follow_queued_reload(ResourceKey::Latest)
            }
            Event::AnalysisFinished { company, outcome } => {
                let report = self.processing.finish(&company, &outcome);
                let mut commands = vec![self.show_toast(report.message)];
                if report.succeeded {
                    self.tabs.select(Tab::Latest);
                    commands.extend(self.reload(ResourceKey::Latest));
                }
                commands
            }
            Event::ChatAnswered { turn, answer } => {
                self.chat.resolve(turn, answer);
                Vec::new()
            }
            Event::ToastExpired(id) => {
                self.toast.expire(id);
                Vec::new()
            }
            Event::HealthChecked(result) => {
                self.backend = match result {
                    Ok(report) => {
                        debug!(status = %report.status, "service health checked");
                        BackendStatus::Online { checked_at: Local::now() }
                    }
                    Err(err) => {
                        warn!(error = %err, "service health check failed");
                        BackendStatus::Offline(err.detail().to_string())
                    }
                };
                Vec::new()
            }
        }
    }

    /// Whether anything is waiting on a completion event.
    pub fn has_pending_work(&self) -> bool {
        self.upcoming.is_loading()
            || self.latest.is_loading()
            || self.processing.current().is_some()
            || self.chat.pending_count() > 0
            || self.toast.current().is_some()
            || self.backend == BackendStatus::Unknown
    }
}
