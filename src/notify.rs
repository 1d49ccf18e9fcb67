//! Best-effort notification side-channel.
//!
//! Handlers emit a notification to the relevant counter-party after a
//! mutation commits and before building the response, so the write is an
//! explicit awaited step rather than dead code after the response.
//! Delivery is at-most-once: a failed write is logged and swallowed, and
//! the primary mutation still succeeds. No retry, no queue, no
//! acknowledgement.

use crate::database::DatabaseManager;
use crate::database::entities::{NotificationEvent, NotificationRecord, Role};
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

/// Who a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// One specific user
    User(i32),
    /// Every user holding a role (e.g. admins reviewing new listings)
    Role(Role),
}

/// A notification to emit, before the store assigns it an id.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub event: NotificationEvent,
    pub recipient: Recipient,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl NewNotification {
    pub fn new(event: NotificationEvent, recipient: Recipient, message: impl Into<String>) -> Self {
        Self {
            event,
            recipient,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Clone)]
pub struct Notifier {
    database: Arc<dyn DatabaseManager>,
}

impl Notifier {
    pub fn new(database: Arc<dyn DatabaseManager>) -> Self {
        Self { database }
    }

    /// Persist a notification record, best-effort.
    ///
    /// Never returns an error: the side-channel must not fail the
    /// primary mutation.
    pub async fn emit(&self, notification: NewNotification) {
        let (recipient_id, recipient_role) = match notification.recipient {
            Recipient::User(id) => (Some(id), None),
            Recipient::Role(role) => (None, Some(role)),
        };

        let record = NotificationRecord {
            id: 0,
            recipient_id,
            recipient_role,
            event_type: notification.event,
            message: notification.message,
            details: notification.details.map(|d| d.to_string()),
            read: false,
            created_at: Utc::now(),
        };

        if let Err(e) = self.database.notifications().create(&record).await {
            warn!(
                event = ?record.event_type,
                recipient_id = ?record.recipient_id,
                recipient_role = ?record.recipient_role,
                "Failed to persist notification: {}",
                e
            );
        }
    }
}
