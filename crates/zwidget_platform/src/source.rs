//! Notification sources
//!
//! A [`NotificationSource`] is the platform side of the event loop: it hands
//! out raw notifications and performs the platform's own routing for each
//! one after the dispatcher has translated it.

use crate::error::Result;
use crate::notification::RawNotification;

/// Outcome of a blocking wait on a notification source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// A notification arrived
    Notification(RawNotification),
    /// The platform reported a quit request
    Quit {
        /// Exit code attached to the quit request
        exit_code: i32,
    },
}

/// Pull-style source of platform notifications
///
/// Implementations are driven from a single thread.
pub trait NotificationSource {
    /// Remove and return the next pending notification without blocking
    fn peek(&mut self) -> Option<RawNotification>;

    /// Block until a notification or quit request arrives
    ///
    /// An error means the source cannot make progress; it is reported to
    /// the caller, never enqueued.
    fn wait(&mut self) -> Result<Delivery>;

    /// Platform routing for a notification that has just been translated
    fn dispatch(&mut self, raw: &RawNotification);
}

impl<S: NotificationSource + ?Sized> NotificationSource for &mut S {
    fn peek(&mut self) -> Option<RawNotification> {
        (**self).peek()
    }

    fn wait(&mut self) -> Result<Delivery> {
        (**self).wait()
    }

    fn dispatch(&mut self, raw: &RawNotification) {
        (**self).dispatch(raw)
    }
}

impl<S: NotificationSource + ?Sized> NotificationSource for Box<S> {
    fn peek(&mut self) -> Option<RawNotification> {
        (**self).peek()
    }

    fn wait(&mut self) -> Result<Delivery> {
        (**self).wait()
    }

    fn dispatch(&mut self, raw: &RawNotification) {
        (**self).dispatch(raw)
    }
}
