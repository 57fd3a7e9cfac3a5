//! Notification side-channel.
//!
//! Stores surface user-visible outcomes through a [`Notifier`] rather than
//! touching the UI directly. The production implementation is a FIFO queue
//! the notification tray drains; tests record and assert.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::cell::RefCell;

/// Severity of a surfaced notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyKind {
    Positive,
    Negative,
    Info,
}

/// A user-visible message with its severity.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub kind: NotifyKind,
    pub message: String,
}

/// Sink for user-visible outcomes.
pub trait Notifier {
    fn notify(&self, kind: NotifyKind, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for std::rc::Rc<N> {
    fn notify(&self, kind: NotifyKind, message: &str) {
        (**self).notify(kind, message);
    }
}

/// FIFO notification queue drained by the tray component.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    items: RefCell<Vec<Notification>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return all pending notifications, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.items.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, kind: NotifyKind, message: &str) {
        self.items
            .borrow_mut()
            .push(Notification { kind, message: message.to_owned() });
    }
}
