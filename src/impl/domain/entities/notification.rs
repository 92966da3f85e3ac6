use chrono::{DateTime, Utc};

pub type NotificationId = String;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub actor: Option<String>,
    /// Originating module, e.g. "anvisa" or "clientes".
    pub module: String,
    /// Event tag within the module, e.g. "created" or "status_changed".
    pub event: String,
    pub is_read: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub message: String,
    pub actor: Option<String>,
    pub module: String,
    pub event: String,
}
