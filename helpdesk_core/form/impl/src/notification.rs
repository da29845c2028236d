use std::sync::{Mutex, PoisonError};

use helpdesk_core_form_contracts::{Notification, Notifier};

/// Collects notifications so they can be rendered after the form was submitted.
#[derive(Debug, Default)]
pub struct NotificationBuffer(Mutex<Vec<Notification>>);

impl NotificationBuffer {
    /// Remove and return all collected notifications.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for NotificationBuffer {
    fn notify(&self, notification: Notification) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take() {
        let buffer = NotificationBuffer::default();
        buffer.notify(Notification::error("a"));
        buffer.notify(Notification::success("b", None));

        assert_eq!(
            buffer.take(),
            [Notification::error("a"), Notification::success("b", None)]
        );
        assert!(buffer.take().is_empty());
    }
}
