//! Toast notifications
//!
//! Screens and auth flows publish; the console drains and prints after
//! each command. The channel is broadcast so several surfaces can
//! listen, and publishing never blocks on slow or dropped receivers.

use serde::Serialize;
use tokio::sync::broadcast;

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl std::fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToastLevel::Info => write!(f, "info"),
            ToastLevel::Success => write!(f, "ok"),
            ToastLevel::Error => write!(f, "error"),
        }
    }
}

/// One user-visible notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Handle for publishing and subscribing to toasts
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Toast>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Toast> {
        self.tx.subscribe()
    }

    pub fn info(&self, message: impl Into<String>) {
        self.publish(ToastLevel::Info, message.into());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.publish(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.publish(ToastLevel::Error, message.into());
    }

    fn publish(&self, level: ToastLevel, message: String) {
        tracing::debug!(%level, %message, "toast");
        // No receivers is fine, the toast is just dropped
        let _ = self.tx.send(Toast { level, message });
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_receive_published_toasts() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();

        notifier.success("saved");
        notifier.error("broke");

        let first = rx.try_recv().unwrap();
        assert_eq!(first.level, ToastLevel::Success);
        assert_eq!(first.message, "saved");

        let second = rx.try_recv().unwrap();
        assert_eq!(second.level, ToastLevel::Error);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_publish_without_receivers_does_not_panic() {
        let notifier = Notifier::new();
        notifier.info("nobody listening");
    }

    #[test]
    fn test_each_subscriber_gets_its_own_stream() {
        let notifier = Notifier::new();
        let mut a = notifier.subscribe();
        let mut b = notifier.subscribe();

        notifier.info("hello");

        assert_eq!(a.try_recv().unwrap().message, "hello");
        assert_eq!(b.try_recv().unwrap().message, "hello");
    }
}
