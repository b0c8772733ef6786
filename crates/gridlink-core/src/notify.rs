//! Notification channel for user-facing failure notices.

use std::cell::RefCell;

/// Surfaces parse, interpretation and link notices to the user.
pub trait Notifier {
    fn report(&self, message: &str);
}

/// Forwards notices to the `tracing` log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn report(&self, message: &str) {
        tracing::warn!(target: "gridlink::notify", "{}", message);
    }
}

/// Keeps every notice for later inspection.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: RefCell<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }
}

impl Notifier for CollectingNotifier {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

