use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{NewNotification, Notification, NotificationId};

#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    /// Newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Notification>, ServerError>;

    async fn count_unread(&self) -> Result<usize, ServerError>;

    async fn create(&self, notification: &NewNotification) -> Result<Notification, ServerError>;

    async fn mark_read(&self, ids: &[NotificationId]) -> Result<(), ServerError>;

    async fn mark_all_read(&self) -> Result<(), ServerError>;
}
