//! Notification log for the GUI
//!
//! Outcomes of user actions (exports, settings saves, explorer links) shown in the
//! status bar at the bottom of the window.

use chrono::{DateTime, Local};
use std::collections::VecDeque;

const MAX_NOTIFICATIONS: usize = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// A notification entry with message and timestamp
#[derive(Clone, Debug)]
pub struct NotificationEntry {
    pub message: String,
    pub level: NotificationLevel,
    pub timestamp: DateTime<Local>,
}

impl NotificationEntry {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
            timestamp: Local::now(),
        }
    }

    pub fn time_ago(&self) -> String {
        self.time_ago_at(Local::now())
    }

    fn time_ago_at(&self, now: DateTime<Local>) -> String {
        let duration = now.signed_duration_since(self.timestamp);
        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            format!("{}m ago", duration.num_minutes())
        } else if duration.num_hours() < 24 {
            format!("{}h ago", duration.num_hours())
        } else {
            self.timestamp.format("%m/%d %H:%M").to_string()
        }
    }
}

/// Bounded, newest-last notification history
#[derive(Debug, Default)]
pub struct Notifications {
    entries: VecDeque<NotificationEntry>,
}

impl Notifications {
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NotificationEntry::new(NotificationLevel::Info, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationEntry::new(NotificationLevel::Error, message));
    }

    pub fn latest(&self) -> Option<&NotificationEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: NotificationEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
    }
}
