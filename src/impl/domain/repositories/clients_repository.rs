use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{Client, ClientDraft, ClientId};

#[async_trait]
pub trait ClientsRepository: Send + Sync {
    /// Clients that are not soft-deleted.
    async fn list_active(&self) -> Result<Vec<Client>, ServerError>;

    async fn list_deleted(&self) -> Result<Vec<Client>, ServerError>;

    async fn get(&self, id: ClientId) -> Result<Option<Client>, ServerError>;

    async fn create(&self, draft: &ClientDraft, actor: &str) -> Result<Client, ServerError>;

    async fn update(
        &self,
        id: ClientId,
        draft: &ClientDraft,
        actor: &str,
    ) -> Result<Client, ServerError>;

    async fn soft_delete(&self, id: ClientId, actor: &str) -> Result<(), ServerError>;

    async fn restore(&self, id: ClientId, actor: &str) -> Result<(), ServerError>;
}
