use async_trait::async_trait;
use chrono::Utc;
use fractic_server_error::ServerError;
use serde_json::json;

use super::utils::{decode_rows, decode_single, ensure_affected};
use crate::{
    data::{
        datasources::postgrest_datasource::{
            eq, order, PostgrestDatasource, PostgrestDatasourceImpl, RemoteSession,
        },
        models::demand_model::{demand_insert_body, payload_to_value, DemandModel, DEMANDS_TABLE},
    },
    domain::repositories::demands_repository::DemandsRepository,
    entities::{ClientId, Demand, DemandId, DemandPayload, DemandStatus},
};

pub(crate) struct DemandsRepositoryImpl<DS = PostgrestDatasourceImpl>
where
    DS: PostgrestDatasource,
{
    datasource: DS,
    org_id: String,
}

impl<DS: PostgrestDatasource> DemandsRepositoryImpl<DS> {
    pub(crate) fn with_datasource(datasource: DS, org_id: &str) -> Self {
        Self {
            datasource,
            org_id: org_id.to_string(),
        }
    }

    async fn patch(&self, id: &DemandId, body: serde_json::Value) -> Result<Demand, ServerError> {
        let rows = self
            .datasource
            .update(
                DEMANDS_TABLE,
                vec![eq("id", id), eq("org_id", &self.org_id)],
                &body,
            )
            .await?;
        decode_single::<DemandModel, Demand>(DEMANDS_TABLE, id, rows)
    }
}

impl DemandsRepositoryImpl {
    pub(crate) fn new(session: RemoteSession, org_id: &str) -> Self {
        Self::with_datasource(PostgrestDatasourceImpl::new(session), org_id)
    }
}

#[async_trait]
impl<DS: PostgrestDatasource> DemandsRepository for DemandsRepositoryImpl<DS> {
    async fn list_all(&self) -> Result<Vec<Demand>, ServerError> {
        let rows = self
            .datasource
            .select(
                DEMANDS_TABLE,
                vec![eq("org_id", &self.org_id), order("updated_at", false)],
            )
            .await?;
        decode_rows::<DemandModel, Demand>(DEMANDS_TABLE, rows)
    }

    async fn list_for_client(&self, client_id: ClientId) -> Result<Vec<Demand>, ServerError> {
        let rows = self
            .datasource
            .select(
                DEMANDS_TABLE,
                vec![
                    eq("org_id", &self.org_id),
                    eq("client_id", client_id),
                    order("updated_at", false),
                ],
            )
            .await?;
        decode_rows::<DemandModel, Demand>(DEMANDS_TABLE, rows)
    }

    async fn create(
        &self,
        client_id: ClientId,
        request_type: &str,
        payload: &DemandPayload,
    ) -> Result<Demand, ServerError> {
        let body = demand_insert_body(&self.org_id, client_id, request_type, payload);
        let rows = self.datasource.insert(DEMANDS_TABLE, &body).await?;
        decode_single::<DemandModel, Demand>(DEMANDS_TABLE, "new", rows)
    }

    async fn update_status(
        &self,
        id: &DemandId,
        status: DemandStatus,
        payload: &DemandPayload,
    ) -> Result<Demand, ServerError> {
        self.patch(
            id,
            json!({
                "status": status.value(),
                "payload": payload_to_value(payload),
                "updated_at": Utc::now().to_rfc3339(),
            }),
        )
        .await
    }

    async fn update_payload(
        &self,
        id: &DemandId,
        payload: &DemandPayload,
    ) -> Result<Demand, ServerError> {
        self.patch(
            id,
            json!({
                "payload": payload_to_value(payload),
                "updated_at": Utc::now().to_rfc3339(),
            }),
        )
        .await
    }

    async fn delete(&self, id: &DemandId) -> Result<(), ServerError> {
        let rows = self
            .datasource
            .delete(DEMANDS_TABLE, vec![eq("id", id), eq("org_id", &self.org_id)])
            .await?;
        ensure_affected(DEMANDS_TABLE, id, &rows)
    }
}
