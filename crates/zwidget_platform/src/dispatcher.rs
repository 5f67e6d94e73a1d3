//! Event queue and dispatcher
//!
//! The [`EventDispatcher`] owns the FIFO of typed events and drives a
//! [`NotificationSource`]: every notification it pulls is resolved to a
//! window identity, translated, enqueued, and then handed back to the source
//! for platform routing.

use crate::error::Result;
use crate::event::Event;
use crate::notification::{Message, RawNotification};
use crate::registry::WindowLookup;
use crate::source::{Delivery, NotificationSource};
use crate::translate::translate;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// FIFO event queue plus the poll/wait loop contract
///
/// Producers and the consumer may live on different threads; every queue
/// operation takes the single internal lock.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    queue: Mutex<VecDeque<Event>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<Event>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an event; the none event is dropped
    pub fn push(&self, event: Event) {
        if event.is_none() {
            return;
        }
        tracing::trace!(kind = ?event.kind(), window = ?event.window_handle(), "event queued");
        self.queue().push_back(event);
    }

    /// Remove the head of the queue, or the none event when empty
    pub fn pop(&self) -> Event {
        self.try_pop().unwrap_or_default()
    }

    pub fn try_pop(&self) -> Option<Event> {
        self.queue().pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }

    /// Discard every queued event
    pub fn clear(&self) {
        self.queue().clear();
    }

    /// Non-blocking: drain the source, then hand out one event
    ///
    /// Every notification currently available is translated and enqueued
    /// before anything is popped, so order across both paths matches arrival
    /// order. A quit notification enqueues a single quit event and ends the
    /// drain; later notifications stay in the source.
    pub fn poll<S, L>(&self, source: &mut S, windows: &L) -> Option<Event>
    where
        S: NotificationSource + ?Sized,
        L: WindowLookup + ?Sized,
    {
        while let Some(raw) = source.peek() {
            if raw.message == Message::Quit {
                tracing::debug!(exit_code = raw.exit_code(), "quit notification received");
                self.push(Event::quit());
                break;
            }
            self.deliver(source, windows, &raw);
        }
        self.try_pop()
    }

    /// Blocking: return a queued event, or wait for the source to produce one
    ///
    /// `Ok(None)` means a notification arrived but produced no event (for
    /// example a paint request); the caller simply waits again. Source
    /// failures are returned as-is and nothing is enqueued for them.
    pub fn wait<S, L>(&self, source: &mut S, windows: &L) -> Result<Option<Event>>
    where
        S: NotificationSource + ?Sized,
        L: WindowLookup + ?Sized,
    {
        if !self.is_empty() {
            return Ok(self.poll(source, windows));
        }

        match source.wait() {
            Ok(Delivery::Notification(raw)) => {
                self.deliver(source, windows, &raw);
                Ok(self.poll(source, windows))
            }
            Ok(Delivery::Quit { exit_code }) => {
                tracing::debug!(exit_code, "quit delivered while waiting");
                self.push(Event::quit());
                Ok(self.try_pop())
            }
            Err(err) => {
                tracing::warn!(error = %err, "notification source failed");
                Err(err)
            }
        }
    }

    fn deliver<S, L>(&self, source: &mut S, windows: &L, raw: &RawNotification)
    where
        S: NotificationSource + ?Sized,
        L: WindowLookup + ?Sized,
    {
        let window = windows.resolve(raw.window);
        if window.is_none() && !raw.window.is_null() {
            tracing::trace!(handle = %raw.window, message = ?raw.message, "notification for unknown window");
        }
        self.push(translate(window, raw));
        source.dispatch(raw);
    }
}
