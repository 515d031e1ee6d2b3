//! In-app notification queue.
//!
//! Every user-visible outcome of the workflow (file accepted, summary
//! ready, any failure) surfaces as a transient, dismissible notification.
//! Errors persist until dismissed; successes auto-dismiss.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Priority level for notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum NotificationPriority {
    /// Low priority, can be delayed.
    Low,
    /// Normal priority.
    #[default]
    Normal,
    /// High priority, show immediately.
    High,
}

/// Category of a notification for filtering and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationCategory {
    /// A file passed ingestion validation.
    FileAccepted,
    /// A summary was generated.
    SummaryReady,
    /// Generation failed (extraction or summarization).
    SummaryFailed,
    /// Text extraction failed.
    ExtractionFailed,
    /// The summary email was sent.
    EmailSent,
    /// The summary email failed to send.
    EmailFailed,
    /// Missing or invalid user input.
    Validation,
    /// General information.
    Info,
}

/// A notification to surface to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Unique identifier.
    pub id: String,
    /// Notification category.
    pub category: NotificationCategory,
    /// Title text.
    pub title: String,
    /// Optional body text.
    pub body: Option<String>,
    /// Priority level.
    pub priority: NotificationPriority,
    /// Auto-dismiss after this duration; `None` persists until dismissed.
    pub auto_dismiss: Option<Duration>,
}

impl Notification {
    /// Creates a notification with an auto-generated id.
    pub fn new(category: NotificationCategory, title: impl Into<String>) -> Self {
        Self {
            id: format!("notif-{}", uuid::Uuid::new_v4()),
            category,
            title: title.into(),
            body: None,
            priority: NotificationPriority::Normal,
            auto_dismiss: Some(Duration::from_secs(5)),
        }
    }

    /// Sets the body text.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the priority.
    pub fn priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Disables auto-dismiss.
    pub fn persistent(mut self) -> Self {
        self.auto_dismiss = None;
        self
    }

    /// Whether this notification represents an error outcome.
    pub fn is_error(&self) -> bool {
        matches!(
            self.category,
            NotificationCategory::SummaryFailed
                | NotificationCategory::ExtractionFailed
                | NotificationCategory::EmailFailed
                | NotificationCategory::Validation
        )
    }

    /// A file was accepted at the ingestion boundary.
    pub fn file_accepted(file_name: &str) -> Self {
        Self::new(
            NotificationCategory::FileAccepted,
            format!("Successfully uploaded {}", file_name),
        )
    }

    /// A summary was generated.
    pub fn summary_ready() -> Self {
        Self::new(
            NotificationCategory::SummaryReady,
            "Summary generated successfully!",
        )
    }

    /// Generation failed.
    pub fn summary_failed(message: &str) -> Self {
        Self::new(NotificationCategory::SummaryFailed, "Error generating summary")
            .body(message)
            .priority(NotificationPriority::High)
            .persistent()
    }

    /// Extraction failed.
    pub fn extraction_failed(message: &str) -> Self {
        Self::new(NotificationCategory::ExtractionFailed, "Error extracting text")
            .body(message)
            .priority(NotificationPriority::High)
            .persistent()
    }

    /// The summary email was delivered to the relay.
    pub fn email_sent(recipients: usize) -> Self {
        Self::new(
            NotificationCategory::EmailSent,
            format!("Summary sent to {} recipient(s)!", recipients),
        )
    }

    /// The summary email failed.
    pub fn email_failed(message: &str) -> Self {
        Self::new(NotificationCategory::EmailFailed, "Error sending email")
            .body(message)
            .priority(NotificationPriority::High)
            .persistent()
    }

    /// Missing or invalid user input.
    pub fn validation(message: &str) -> Self {
        Self::new(NotificationCategory::Validation, message)
            .priority(NotificationPriority::High)
            .dismiss_after(Duration::from_secs(10))
    }

    /// General information.
    pub fn info(message: &str) -> Self {
        Self::new(NotificationCategory::Info, message)
    }

    /// Sets auto-dismiss duration.
    pub fn dismiss_after(mut self, duration: Duration) -> Self {
        self.auto_dismiss = Some(duration);
        self
    }
}

/// A queued notification with tracking info.
#[derive(Debug, Clone)]
struct QueuedNotification {
    notification: Notification,
    queued_at: Instant,
    dismissed: bool,
}

impl QueuedNotification {
    fn is_expired(&self) -> bool {
        match self.notification.auto_dismiss {
            Some(duration) => self.queued_at.elapsed() >= duration,
            None => false,
        }
    }
}

/// FIFO queue of active notifications.
#[derive(Debug, Default)]
pub struct NotificationService {
    queue: VecDeque<QueuedNotification>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notification.
    pub fn notify(&mut self, notification: Notification) {
        if notification.is_error() {
            tracing::warn!(
                category = ?notification.category,
                title = %notification.title,
                body = ?notification.body,
                "Notification"
            );
        } else {
            tracing::info!(
                category = ?notification.category,
                title = %notification.title,
                "Notification"
            );
        }

        self.queue.push_back(QueuedNotification {
            notification,
            queued_at: Instant::now(),
            dismissed: false,
        });
    }

    /// Dismisses a notification by id.
    pub fn dismiss(&mut self, id: &str) {
        if let Some(entry) = self.queue.iter_mut().find(|n| n.notification.id == id) {
            entry.dismissed = true;
        }
    }

    /// Dismisses everything.
    pub fn dismiss_all(&mut self) {
        for entry in self.queue.iter_mut() {
            entry.dismissed = true;
        }
    }

    /// Drops dismissed and expired notifications from the queue.
    pub fn cleanup(&mut self) {
        self.queue.retain(|n| !n.dismissed && !n.is_expired());
    }

    /// Returns all currently visible notifications.
    pub fn active(&self) -> Vec<&Notification> {
        self.queue
            .iter()
            .filter(|n| !n.dismissed && !n.is_expired())
            .map(|n| &n.notification)
            .collect()
    }

    /// Number of currently visible notifications.
    pub fn active_count(&self) -> usize {
        self.active().len()
    }

    /// Active notifications in a given category.
    pub fn active_in_category(&self, category: NotificationCategory) -> Vec<&Notification> {
        self.active()
            .into_iter()
            .filter(|n| n.category == category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders() {
        let notification = Notification::new(NotificationCategory::Info, "Test")
            .body("Body text")
            .priority(NotificationPriority::High)
            .persistent();

        assert_eq!(notification.title, "Test");
        assert_eq!(notification.body, Some("Body text".to_string()));
        assert_eq!(notification.priority, NotificationPriority::High);
        assert!(notification.auto_dismiss.is_none());
    }

    #[test]
    fn error_categories() {
        assert!(Notification::summary_failed("x").is_error());
        assert!(Notification::extraction_failed("x").is_error());
        assert!(Notification::email_failed("x").is_error());
        assert!(Notification::validation("x").is_error());
        assert!(!Notification::summary_ready().is_error());
        assert!(!Notification::email_sent(2).is_error());
    }

    #[test]
    fn notify_and_dismiss() {
        let mut service = NotificationService::new();
        service.notify(Notification::info("One"));
        service.notify(Notification::info("Two"));
        assert_eq!(service.active_count(), 2);

        let id = service.active()[0].id.clone();
        service.dismiss(&id);
        assert_eq!(service.active_count(), 1);

        service.dismiss_all();
        assert_eq!(service.active_count(), 0);
    }

    #[test]
    fn errors_persist_until_dismissed() {
        let notification = Notification::summary_failed("timeout");
        assert!(notification.auto_dismiss.is_none());

        let mut service = NotificationService::new();
        service.notify(notification);
        service.cleanup();
        assert_eq!(service.active_count(), 1);
    }

    #[test]
    fn expired_notifications_disappear() {
        let mut service = NotificationService::new();
        service.notify(Notification::info("fleeting").dismiss_after(Duration::from_millis(1)));

        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(service.active_count(), 0);

        service.cleanup();
        assert!(service.active().is_empty());
    }

    #[test]
    fn category_filter() {
        let mut service = NotificationService::new();
        service.notify(Notification::summary_ready());
        service.notify(Notification::email_sent(1));

        let ready = service.active_in_category(NotificationCategory::SummaryReady);
        assert_eq!(ready.len(), 1);
        assert!(service
            .active_in_category(NotificationCategory::EmailFailed)
            .is_empty());
    }
}
