use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::repositories::notifications_repository_impl::NotificationsRepositoryImpl,
    domain::repositories::notifications_repository::NotificationsRepository,
    entities::{Notification, NotificationId},
};

#[async_trait]
pub trait NotificationsUsecase: Send + Sync {
    async fn list_recent(&self, limit: usize) -> Result<Vec<Notification>, ServerError>;

    async fn unread_count(&self) -> Result<usize, ServerError>;

    async fn mark_read(&self, ids: &[NotificationId]) -> Result<(), ServerError>;

    async fn mark_all_read(&self) -> Result<(), ServerError>;
}

pub(crate) struct NotificationsUsecaseImpl<R1 = NotificationsRepositoryImpl>
where
    R1: NotificationsRepository,
{
    notifications_repository: R1,
}

impl<R1: NotificationsRepository> NotificationsUsecaseImpl<R1> {
    pub(crate) fn new(notifications_repository: R1) -> Self {
        Self {
            notifications_repository,
        }
    }
}

#[async_trait]
impl<R1: NotificationsRepository> NotificationsUsecase for NotificationsUsecaseImpl<R1> {
    async fn list_recent(&self, limit: usize) -> Result<Vec<Notification>, ServerError> {
        self.notifications_repository.list_recent(limit).await
    }

    async fn unread_count(&self) -> Result<usize, ServerError> {
        self.notifications_repository.count_unread().await
    }

    async fn mark_read(&self, ids: &[NotificationId]) -> Result<(), ServerError> {
        self.notifications_repository.mark_read(ids).await
    }

    async fn mark_all_read(&self) -> Result<(), ServerError> {
        self.notifications_repository.mark_all_read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::usecases::demands_usecase::fakes::InMemoryNotificationsRepository,
        entities::NewNotification,
    };

    #[tokio::test]
    async fn marks_notifications_read() {
        let repo = InMemoryNotificationsRepository::default();
        for message in ["a", "b", "c"] {
            repo.create(&NewNotification {
                message: message.into(),
                actor: None,
                module: "anvisa".into(),
                event: "created".into(),
            })
            .await
            .unwrap();
        }
        let usecase = NotificationsUsecaseImpl::new(repo);
        assert_eq!(usecase.unread_count().await.unwrap(), 3);

        let recent = usecase.list_recent(2).await.unwrap();
        assert_eq!(recent[0].message, "c");
        usecase.mark_read(&[recent[0].id.clone()]).await.unwrap();
        assert_eq!(usecase.unread_count().await.unwrap(), 2);

        usecase.mark_all_read().await.unwrap();
        assert_eq!(usecase.unread_count().await.unwrap(), 0);
    }
}
