// src/runtime.rs
//! Runs `Command`s on tokio and posts the resulting `Event`s back to the
//! thread that owns the state.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::MarketApi;
use crate::state::{Command, Event, ResourceKey, ToastId};

/// Pending toast dismissal. Dropping the handle cancels the timer.
#[derive(Debug)]
pub struct DismissTimer {
    id: ToastId,
    task: JoinHandle<()>,
}

impl DismissTimer {
    fn spawn(handle: &Handle, events: UnboundedSender<Event>, id: ToastId, after: Duration) -> Self {
        let task = handle.spawn(async move {
            tokio::time::sleep(after).await;
            let _ = events.send(Event::ToastExpired(id));
        });
        Self { id, task }
    }

    pub fn id(&self) -> ToastId {
        self.id
    }
}

impl Drop for DismissTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct Effects {
    api: Arc<dyn MarketApi>,
    handle: Handle,
    events: UnboundedSender<Event>,
    toast_timer: Option<DismissTimer>,
}

impl Effects {
    pub fn new(api: Arc<dyn MarketApi>, handle: Handle, events: UnboundedSender<Event>) -> Self {
        Self {
            api,
            handle,
            events,
            toast_timer: None,
        }
    }

    pub fn toast_timer(&self) -> Option<&DismissTimer> {
        self.toast_timer.as_ref()
    }

    pub fn dispatch(&mut self, commands: Vec<Command>) {
        for command in commands {
            self.run(command);
        }
    }

    fn run(&mut self, command: Command) {
        debug!(?command, "dispatching");
        match command {
            Command::Load(ResourceKey::Upcoming) => {
                self.spawn(|api| async move { Event::UpcomingLoaded(api.upcoming_results().await) })
            }
            Command::Load(ResourceKey::Latest) => {
                self.spawn(|api| async move { Event::LatestLoaded(api.latest_results().await) })
            }
            Command::Analyze { company, ticker } => self.spawn(|api| async move {
                let outcome = api.trigger_analysis(&company, &ticker).await;
                Event::AnalysisFinished { company, outcome }
            }),
            Command::Chat { turn, query } => self.spawn(|api| async move {
                let answer = api.send_chat_query(&query).await;
                Event::ChatAnswered { turn, answer }
            }),
            Command::CheckHealth => {
                self.spawn(|api| async move { Event::HealthChecked(api.health().await) })
            }
            Command::DismissToastAfter { id, after } => {
                // Replacing the previous timer drops it, which aborts it.
                self.toast_timer = Some(DismissTimer::spawn(&self.handle, self.events.clone(), id, after));
            }
        }
    }

    fn spawn<F, Fut>(&self, operation: F)
    where
        F: FnOnce(Arc<dyn MarketApi>) -> Fut,
        Fut: std::future::Future<Output = Event> + Send + 'static,
    {
        let events = self.events.clone();
        let future = operation(Arc::clone(&self.api));
        self.handle.spawn(async move {
            let event = future.await;
            if events.send(event).is_err() {
                debug!("dashboard closed before completion was delivered");
            }
        });
    }
}
