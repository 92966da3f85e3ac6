use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::{
        models::client_model::CLIENTS_TABLE,
        repositories::clients_repository_impl::ClientsRepositoryImpl,
    },
    domain::repositories::clients_repository::ClientsRepository,
    entities::{Client, ClientDraft, ClientId},
    errors::RemoteRecordNotFound,
};

#[async_trait]
pub trait ClientsUsecase: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Client>, ServerError>;

    async fn list_deleted(&self) -> Result<Vec<Client>, ServerError>;

    /// Fresh copy of one client, e.g. to refresh its row after an edit.
    async fn get(&self, id: ClientId) -> Result<Client, ServerError>;

    async fn create(&self, draft: &ClientDraft, actor: &str) -> Result<Client, ServerError>;

    async fn update(
        &self,
        id: ClientId,
        draft: &ClientDraft,
        actor: &str,
    ) -> Result<Client, ServerError>;

    async fn delete(&self, id: ClientId, actor: &str) -> Result<(), ServerError>;

    async fn restore(&self, id: ClientId, actor: &str) -> Result<(), ServerError>;
}

pub(crate) struct ClientsUsecaseImpl<R1 = ClientsRepositoryImpl>
where
    R1: ClientsRepository,
{
    clients_repository: R1,
}

impl<R1: ClientsRepository> ClientsUsecaseImpl<R1> {
    pub(crate) fn new(clients_repository: R1) -> Self {
        Self { clients_repository }
    }
}

#[async_trait]
impl<R1: ClientsRepository> ClientsUsecase for ClientsUsecaseImpl<R1> {
    async fn list_active(&self) -> Result<Vec<Client>, ServerError> {
        self.clients_repository.list_active().await
    }

    async fn list_deleted(&self) -> Result<Vec<Client>, ServerError> {
        self.clients_repository.list_deleted().await
    }

    async fn get(&self, id: ClientId) -> Result<Client, ServerError> {
        self.clients_repository
            .get(id)
            .await?
            .ok_or_else(|| RemoteRecordNotFound::new(CLIENTS_TABLE, &id.to_string()))
    }

    async fn create(&self, draft: &ClientDraft, actor: &str) -> Result<Client, ServerError> {
        draft.validate()?;
        let client = self.clients_repository.create(draft, actor).await?;
        tracing::info!(client_id = client.id, action = "client.create", "client created");
        Ok(client)
    }

    async fn update(
        &self,
        id: ClientId,
        draft: &ClientDraft,
        actor: &str,
    ) -> Result<Client, ServerError> {
        draft.validate()?;
        let client = self.clients_repository.update(id, draft, actor).await?;
        tracing::info!(client_id = id, action = "client.update", "client updated");
        Ok(client)
    }

    async fn delete(&self, id: ClientId, actor: &str) -> Result<(), ServerError> {
        self.clients_repository.soft_delete(id, actor).await?;
        tracing::info!(client_id = id, action = "client.delete", "client moved to trash");
        Ok(())
    }

    async fn restore(&self, id: ClientId, actor: &str) -> Result<(), ServerError> {
        self.clients_repository.restore(id, actor).await?;
        tracing::info!(client_id = id, action = "client.restore", "client restored");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::{fakes::*, *};

    #[tokio::test]
    async fn create_validates_before_calling_remote() {
        let usecase = ClientsUsecaseImpl::new(InMemoryClientsRepository::default());
        let bad = ClientDraft {
            razao_social: " ".into(),
            ..Default::default()
        };
        assert!(usecase.create(&bad, "ana").await.is_err());
        assert!(usecase.list_active().await.unwrap().is_empty());

        let good = ClientDraft {
            razao_social: "Farmácia Boa Saúde".into(),
            cnpj: "11222333000181".into(),
            ..Default::default()
        };
        let created = usecase.create(&good, "ana").await.unwrap();
        assert_eq!(created.ultima_por.as_deref(), Some("ana"));
    }

    #[tokio::test]
    async fn delete_and_restore_move_between_lists() {
        let usecase =
            ClientsUsecaseImpl::new(InMemoryClientsRepository::with(vec![client(1, "A")]));
        usecase.delete(1, "ana").await.unwrap();
        assert!(usecase.list_active().await.unwrap().is_empty());
        assert_eq!(usecase.list_deleted().await.unwrap().len(), 1);

        usecase.restore(1, "ana").await.unwrap();
        assert_eq!(usecase.list_active().await.unwrap().len(), 1);
        assert!(usecase.delete(99, "ana").await.is_err());
    }

    #[tokio::test]
    async fn get_reports_missing_client() {
        let usecase =
            ClientsUsecaseImpl::new(InMemoryClientsRepository::with(vec![client(1, "A")]));
        assert_eq!(usecase.get(1).await.unwrap().razao_social, "A");
        assert!(usecase.get(2).await.is_err());
    }
}
