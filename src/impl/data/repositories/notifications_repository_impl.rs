use async_trait::async_trait;
use fractic_server_error::ServerError;
use serde_json::json;

use super::utils::{decode_rows, decode_single};
use crate::{
    data::{
        datasources::postgrest_datasource::{
            eq, order, PostgrestDatasource, PostgrestDatasourceImpl, RemoteSession,
        },
        models::notification_model::{
            notification_insert_body, NotificationModel, NOTIFICATIONS_TABLE,
        },
    },
    domain::repositories::notifications_repository::NotificationsRepository,
    entities::{NewNotification, Notification, NotificationId},
};

pub(crate) struct NotificationsRepositoryImpl<DS = PostgrestDatasourceImpl>
where
    DS: PostgrestDatasource,
{
    datasource: DS,
    org_id: String,
}

impl<DS: PostgrestDatasource> NotificationsRepositoryImpl<DS> {
    pub(crate) fn with_datasource(datasource: DS, org_id: &str) -> Self {
        Self {
            datasource,
            org_id: org_id.to_string(),
        }
    }
}

impl NotificationsRepositoryImpl {
    pub(crate) fn new(session: RemoteSession, org_id: &str) -> Self {
        Self::with_datasource(PostgrestDatasourceImpl::new(session), org_id)
    }
}

#[async_trait]
impl<DS: PostgrestDatasource> NotificationsRepository for NotificationsRepositoryImpl<DS> {
    async fn list_recent(&self, limit: usize) -> Result<Vec<Notification>, ServerError> {
        let rows = self
            .datasource
            .select(
                NOTIFICATIONS_TABLE,
                vec![
                    eq("org_id", &self.org_id),
                    order("created_at", false),
                    ("limit".to_string(), limit.to_string()),
                ],
            )
            .await?;
        decode_rows::<NotificationModel, Notification>(NOTIFICATIONS_TABLE, rows)
    }

    async fn count_unread(&self) -> Result<usize, ServerError> {
        self.datasource
            .count(
                NOTIFICATIONS_TABLE,
                vec![eq("org_id", &self.org_id), eq("is_read", false)],
            )
            .await
    }

    async fn create(&self, notification: &NewNotification) -> Result<Notification, ServerError> {
        let body = notification_insert_body(&self.org_id, notification);
        let rows = self.datasource.insert(NOTIFICATIONS_TABLE, &body).await?;
        decode_single::<NotificationModel, Notification>(NOTIFICATIONS_TABLE, "new", rows)
    }

    async fn mark_read(&self, ids: &[NotificationId]) -> Result<(), ServerError> {
        if ids.is_empty() {
            return Ok(());
        }
        let filter = (
            "id".to_string(),
            format!("in.({})", ids.join(",")),
        );
        self.datasource
            .update(
                NOTIFICATIONS_TABLE,
                vec![filter, eq("org_id", &self.org_id)],
                &json!({ "is_read": true }),
            )
            .await?;
        Ok(())
    }

    async fn mark_all_read(&self) -> Result<(), ServerError> {
        self.datasource
            .update(
                NOTIFICATIONS_TABLE,
                vec![eq("org_id", &self.org_id), eq("is_read", false)],
                &json!({ "is_read": true }),
            )
            .await?;
        Ok(())
    }
}
