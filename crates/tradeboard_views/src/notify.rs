//! Transient user notifications.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Entries kept by a [`NotificationLog`].
pub const NOTIFICATION_CAPACITY: usize = 100;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// An action completed.
    Success,
    /// An action failed.
    Error,
}

/// One notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Severity.
    pub level: Level,
    /// Text shown to the user.
    pub message: String,
    /// When it was raised.
    pub at: DateTime<Utc>,
}

/// Surfaces mutation outcomes to the user.
pub trait Notifier: Send + Sync {
    /// Shows `message` at `level`.
    fn notify(&self, level: Level, message: &str);

    /// Shows a success message.
    fn success(&self, message: &str) {
        self.notify(Level::Success, message);
    }

    /// Shows an error message.
    fn error(&self, message: &str) {
        self.notify(Level::Error, message);
    }
}

/// In-memory notifier keeping the most recent entries.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<VecDeque<Notification>>,
}

impl NotificationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.lock().iter().cloned().collect()
    }

    /// Most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<Notification> {
        self.entries.lock().back().cloned()
    }

    /// Number of entries at `level`.
    #[must_use]
    pub fn count(&self, level: Level) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.level == level)
            .count()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, level: Level, message: &str) {
        match level {
            Level::Success => tracing::info!(text = message, "notification"),
            Level::Error => tracing::warn!(text = message, "notification"),
        }

        let mut entries = self.entries.lock();
        if entries.len() == NOTIFICATION_CAPACITY {
            entries.pop_front();
        }
        entries.push_back(Notification {
            level,
            message: message.to_string(),
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_latest_entries() {
        let log = NotificationLog::new();
        for i in 0..=NOTIFICATION_CAPACITY {
            log.success(&format!("saved {i}"));
        }
        log.error("failed");

        assert_eq!(log.len(), NOTIFICATION_CAPACITY);
        assert_eq!(log.entries()[0].message, "saved 2");
        assert_eq!(log.last().map(|n| n.level), Some(Level::Error));
        assert_eq!(log.count(Level::Error), 1);

        log.clear();
        assert!(log.is_empty());
    }
}
