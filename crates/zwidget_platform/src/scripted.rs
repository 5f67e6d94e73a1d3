//! In-memory notification source
//!
//! [`ScriptedSource`] replays notifications posted to it in FIFO order. It
//! backs the headless backend and drives the dispatcher in tests.

use crate::error::{PlatformError, Result};
use crate::notification::{Message, RawNotification};
use crate::source::{Delivery, NotificationSource};
use std::collections::VecDeque;

/// FIFO of notifications with a record of what was dispatched
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pending: VecDeque<RawNotification>,
    dispatched: Vec<RawNotification>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source preloaded with `notifications`
    pub fn from_notifications(notifications: impl IntoIterator<Item = RawNotification>) -> Self {
        Self {
            pending: notifications.into_iter().collect(),
            dispatched: Vec::new(),
        }
    }

    /// Append a notification
    pub fn post(&mut self, raw: RawNotification) {
        self.pending.push_back(raw);
    }

    /// Append a thread-level quit request
    pub fn post_quit(&mut self, exit_code: i32) {
        self.post(RawNotification::quit(exit_code));
    }

    /// Notifications not yet handed out
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Every notification routed through [`NotificationSource::dispatch`], in order
    pub fn dispatched(&self) -> &[RawNotification] {
        &self.dispatched
    }

    pub fn take_dispatched(&mut self) -> Vec<RawNotification> {
        std::mem::take(&mut self.dispatched)
    }
}

impl NotificationSource for ScriptedSource {
    fn peek(&mut self) -> Option<RawNotification> {
        self.pending.pop_front()
    }

    fn wait(&mut self) -> Result<Delivery> {
        match self.pending.pop_front() {
            Some(raw) if raw.message == Message::Quit => Ok(Delivery::Quit {
                exit_code: raw.exit_code(),
            }),
            Some(raw) => Ok(Delivery::Notification(raw)),
            None => Err(PlatformError::EventLoop(
                "scripted source is empty; wait would block forever".to_string(),
            )),
        }
    }

    fn dispatch(&mut self, raw: &RawNotification) {
        self.dispatched.push(*raw);
    }
}
