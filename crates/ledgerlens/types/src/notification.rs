//! User-visible notification payloads
//!
//! Every recoverable failure and noteworthy state change in the engine
//! surfaces as one of these; the hosting UI decides how to display them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a notification, ordered least to most severe
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// Neutral status update
    Info,
    /// Operation completed as requested
    Success,
    /// Recoverable user or data problem
    Warning,
    /// Operation failed; prior state preserved
    Error,
}

impl std::fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationLevel::Info => write!(f, "info"),
            NotificationLevel::Success => write!(f, "success"),
            NotificationLevel::Warning => write!(f, "warning"),
            NotificationLevel::Error => write!(f, "error"),
        }
    }
}

/// A user-visible notification emitted by the engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Display message
    pub message: String,
    /// When the notification was emitted
    pub at: DateTime<Utc>,
}

impl Notification {
    /// Create a notification at the given level
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }

    /// Info-level notification
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, message)
    }

    /// Success-level notification
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    /// Warning-level notification
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, message)
    }

    /// Error-level notification
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }
}
