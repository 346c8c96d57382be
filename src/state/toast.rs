// src/state/toast.rs
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub expires_at: Instant,
}

/// Single-slot ephemeral notification.
#[derive(Debug)]
pub struct NotificationToast {
    current: Option<Toast>,
    duration: Duration,
    next_id: u64,
}

impl NotificationToast {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
            next_id: 0,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Replaces whatever is showing and restarts the countdown.
    pub fn show(&mut self, message: impl Into<String>, now: Instant) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        self.current = Some(Toast {
            id,
            message: message.into(),
            expires_at: now + self.duration,
        });
        id
    }

    /// Clears the slot if `id` is still the toast being shown.
    pub fn expire(&mut self, id: ToastId) -> bool {
        if self.current.as_ref().map(|toast| toast.id) == Some(id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}
