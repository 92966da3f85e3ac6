use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{ClientId, Demand, DemandId, DemandPayload, DemandStatus};

#[async_trait]
pub trait DemandsRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Demand>, ServerError>;

    async fn list_for_client(&self, client_id: ClientId) -> Result<Vec<Demand>, ServerError>;

    /// Inserts a new demand in `draft`.
    async fn create(
        &self,
        client_id: ClientId,
        request_type: &str,
        payload: &DemandPayload,
    ) -> Result<Demand, ServerError>;

    async fn update_status(
        &self,
        id: &DemandId,
        status: DemandStatus,
        payload: &DemandPayload,
    ) -> Result<Demand, ServerError>;

    async fn update_payload(
        &self,
        id: &DemandId,
        payload: &DemandPayload,
    ) -> Result<Demand, ServerError>;

    async fn delete(&self, id: &DemandId) -> Result<(), ServerError>;
}
