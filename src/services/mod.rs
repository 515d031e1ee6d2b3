//! Service layer sitting between the workflow controller and the providers.

mod notification;
mod summary;

pub use notification::{
    Notification, NotificationCategory, NotificationPriority, NotificationService,
};
pub use summary::{SummaryService, SummarizeError, SummarizeResult, SYSTEM_INSTRUCTION};
