//! Application types and state structures

use std::time::Duration;

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(4);

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Normal mode - the themed hero scene
    Showcase,
    /// Theme picker modal
    ThemePicker,
}

/// Notification severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotifyLevel {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

/// Notification message
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub level: NotifyLevel,
    /// Time left before it is dropped
    pub remaining: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotifyLevel) -> Self {
        Self {
            message: message.into(),
            level,
            remaining: NOTIFICATION_TTL,
        }
    }

    /// Count down by `dt`; returns false once expired
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        !self.remaining.is_zero()
    }

    pub fn icon(&self) -> &'static str {
        match self.level {
            NotifyLevel::Info => "ℹ",
            NotifyLevel::Warning => "⚠",
            NotifyLevel::Error => "✗",
            NotifyLevel::Success => "✓",
        }
    }
}
