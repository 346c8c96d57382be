// src/dashboard.rs
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
use tracing::warn;

use crate::api::MarketApi;
use crate::runtime::Effects;
use crate::state::{Command, DashboardState, Event, ResourceKey, Tab};

/// Root composition: owns the state container, the effect runner, and the
/// completion channel between them. All state changes happen through here
/// on the owning thread.
pub struct Dashboard {
    state: DashboardState,
    effects: Effects,
    events: UnboundedReceiver<Event>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn MarketApi>, handle: Handle, toast_duration: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: DashboardState::new(toast_duration),
            effects: Effects::new(api, handle, tx),
            events: rx,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn chat_input_mut(&mut self) -> &mut String {
        &mut self.state.chat_input
    }

    fn dispatch(&mut self, commands: Vec<Command>) {
        self.effects.dispatch(commands);
    }

    pub fn start(&mut self) {
        let commands = self.state.start();
        self.dispatch(commands);
    }

    pub fn select_tab(&mut self, tab: Tab) {
        let commands = self.state.select_tab(tab);
        self.dispatch(commands);
    }

    pub fn refresh(&mut self) {
        let commands = self.state.refresh();
        self.dispatch(commands);
    }

    pub fn process(&mut self, company: &str, ticker: &str) {
        let commands = self.state.process(company, ticker);
        self.dispatch(commands);
    }

    pub fn submit_chat(&mut self) {
        let commands = self.state.submit_chat();
        self.dispatch(commands);
    }

    pub fn ask_about(&mut self, company_symbol: &str) {
        let commands = self.state.ask_about(company_symbol);
        self.dispatch(commands);
    }

    pub fn clear_focus(&mut self) {
        self.state.clear_focus();
    }

    pub fn clear_chat(&mut self) {
        self.state.chat.clear();
    }

    pub fn dismiss_error(&mut self, key: ResourceKey) {
        self.state.dismiss_error(key);
    }

    pub fn apply(&mut self, event: Event) {
        let commands = self.state.apply(event);
        self.dispatch(commands);
    }

    /// Applies every completion that has arrived. Returns how many were applied.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("event channel disconnected");
                    break;
                }
            }
        }
        applied
    }

    /// Waits for the next completion and applies it.
    pub async fn next_event(&mut self) -> Option<()> {
        let event = self.events.recv().await?;
        self.apply(event);
        Some(())
    }
}
