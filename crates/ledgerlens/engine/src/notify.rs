//! User-facing notifications
//!
//! The engine surfaces load failures, empty exports and the like as
//! [`Notification`] values. The hub keeps an in-memory log and fans each
//! notification out over a broadcast channel for hosts that render toasts.
//! Publishing never fails: with no subscribers the log still records it.

use ledgerlens_types::notification::{Notification, NotificationLevel};
use tokio::sync::broadcast;
use tracing::info;

const CHANNEL_CAPACITY: usize = 64;

/// Log plus broadcast fan-out for engine notifications.
#[derive(Debug)]
pub struct NotificationHub {
    log: Vec<Notification>,
    sender: broadcast::Sender<Notification>,
}

impl NotificationHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            log: Vec::new(),
            sender,
        }
    }

    /// Record and fan out a notification.
    pub fn publish(&mut self, notification: Notification) {
        info!(
            level = %notification.level,
            message = %notification.message,
            "notification"
        );
        // send only errors when nobody is listening, which is fine
        let _ = self.sender.send(notification.clone());
        self.log.push(notification);
    }

    /// Listen for notifications published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Everything published so far, oldest first.
    pub fn log(&self) -> &[Notification] {
        &self.log
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.log.last()
    }

    /// Latest notification at or above the given level.
    pub fn latest_at_least(&self, level: NotificationLevel) -> Option<&Notification> {
        self.log.iter().rev().find(|n| n.level >= level)
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_published_notifications() {
        let mut hub = NotificationHub::new();
        let mut rx = hub.subscribe();
        hub.publish(Notification::warning("no data to export"));
        let received = rx.recv().await.unwrap();
        assert_eq!(received.level, NotificationLevel::Warning);
        assert_eq!(received.message, "no data to export");
    }

    #[test]
    fn test_log_records_without_subscribers() {
        let mut hub = NotificationHub::new();
        hub.publish(Notification::error("load failed"));
        hub.publish(Notification::success("loaded 42 transactions"));
        assert_eq!(hub.log().len(), 2);
        assert_eq!(hub.latest().unwrap().level, NotificationLevel::Success);
    }

    #[test]
    fn test_latest_at_least_filters_by_severity() {
        let mut hub = NotificationHub::new();
        hub.publish(Notification::error("load failed"));
        hub.publish(Notification::info("retrying"));
        let latest = hub.latest_at_least(NotificationLevel::Warning).unwrap();
        assert_eq!(latest.message, "load failed");
    }
}
