use async_trait::async_trait;
use chrono::Utc;
use fractic_server_error::ServerError;
use serde_json::json;

use super::utils::{decode_rows, decode_single, ensure_affected};
use crate::{
    data::{
        datasources::postgrest_datasource::{
            eq, is_null, not_null, order, PostgrestDatasource, PostgrestDatasourceImpl,
            RemoteSession,
        },
        models::client_model::{client_write_body, ClientModel, CLIENTS_TABLE},
    },
    domain::repositories::clients_repository::ClientsRepository,
    entities::{Client, ClientDraft, ClientId},
};

pub(crate) struct ClientsRepositoryImpl<DS = PostgrestDatasourceImpl>
where
    DS: PostgrestDatasource,
{
    datasource: DS,
    org_id: String,
}

impl<DS: PostgrestDatasource> ClientsRepositoryImpl<DS> {
    pub(crate) fn with_datasource(datasource: DS, org_id: &str) -> Self {
        Self {
            datasource,
            org_id: org_id.to_string(),
        }
    }

    async fn set_deleted_at(
        &self,
        id: ClientId,
        actor: &str,
        deleted: bool,
    ) -> Result<(), ServerError> {
        let now = Utc::now();
        let body = json!({
            "deleted_at": if deleted { Some(now.to_rfc3339()) } else { None },
            "ultima_alteracao": now.to_rfc3339(),
            "ultima_por": actor,
        });
        let rows = self
            .datasource
            .update(
                CLIENTS_TABLE,
                vec![eq("id", id), eq("org_id", &self.org_id)],
                &body,
            )
            .await?;
        ensure_affected(CLIENTS_TABLE, &id.to_string(), &rows)
    }
}

impl ClientsRepositoryImpl {
    pub(crate) fn new(session: RemoteSession, org_id: &str) -> Self {
        Self::with_datasource(PostgrestDatasourceImpl::new(session), org_id)
    }
}

#[async_trait]
impl<DS: PostgrestDatasource> ClientsRepository for ClientsRepositoryImpl<DS> {
    async fn list_active(&self) -> Result<Vec<Client>, ServerError> {
        let rows = self
            .datasource
            .select(
                CLIENTS_TABLE,
                vec![
                    eq("org_id", &self.org_id),
                    is_null("deleted_at"),
                    order("razao_social", true),
                ],
            )
            .await?;
        decode_rows::<ClientModel, Client>(CLIENTS_TABLE, rows)
    }

    async fn list_deleted(&self) -> Result<Vec<Client>, ServerError> {
        let rows = self
            .datasource
            .select(
                CLIENTS_TABLE,
                vec![
                    eq("org_id", &self.org_id),
                    not_null("deleted_at"),
                    order("deleted_at", false),
                ],
            )
            .await?;
        decode_rows::<ClientModel, Client>(CLIENTS_TABLE, rows)
    }

    async fn get(&self, id: ClientId) -> Result<Option<Client>, ServerError> {
        let rows = self
            .datasource
            .select(CLIENTS_TABLE, vec![eq("id", id), eq("org_id", &self.org_id)])
            .await?;
        Ok(decode_rows::<ClientModel, Client>(CLIENTS_TABLE, rows)?
            .into_iter()
            .next())
    }

    async fn create(&self, draft: &ClientDraft, actor: &str) -> Result<Client, ServerError> {
        let body = client_write_body(&self.org_id, draft, actor, Utc::now());
        let rows = self.datasource.insert(CLIENTS_TABLE, &body).await?;
        decode_single::<ClientModel, Client>(CLIENTS_TABLE, "new", rows)
    }

    async fn update(
        &self,
        id: ClientId,
        draft: &ClientDraft,
        actor: &str,
    ) -> Result<Client, ServerError> {
        let body = client_write_body(&self.org_id, draft, actor, Utc::now());
        let rows = self
            .datasource
            .update(
                CLIENTS_TABLE,
                vec![eq("id", id), eq("org_id", &self.org_id)],
                &body,
            )
            .await?;
        decode_single::<ClientModel, Client>(CLIENTS_TABLE, &id.to_string(), rows)
    }

    async fn soft_delete(&self, id: ClientId, actor: &str) -> Result<(), ServerError> {
        self.set_deleted_at(id, actor, true).await
    }

    async fn restore(&self, id: ClientId, actor: &str) -> Result<(), ServerError> {
        self.set_deleted_at(id, actor, false).await
    }
}
