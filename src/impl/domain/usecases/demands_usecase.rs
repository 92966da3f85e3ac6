use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::{
    data::repositories::{
        demands_repository_impl::DemandsRepositoryImpl, file_storage_impl::FileStorageImpl,
        notifications_repository_impl::NotificationsRepositoryImpl,
    },
    domain::{
        logic::{duplicate_guard::ensure_no_open_duplicate, slug::demand_storage_key},
        repositories::{
            demands_repository::DemandsRepository, file_storage::FileStorage,
            notifications_repository::NotificationsRepository,
        },
    },
    entities::{ClientId, Demand, DemandPayload, DemandStatus, NewDemand, NewNotification},
    errors::InvalidStatusTransition,
};

pub(crate) const ANVISA_MODULE: &str = "anvisa";

#[async_trait]
pub trait DemandsUsecase: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Demand>, ServerError>;

    async fn list_for_client(&self, client_id: ClientId) -> Result<Vec<Demand>, ServerError>;

    /// Rejects a second open demand of the same type for the client.
    async fn create(&self, new_demand: &NewDemand, actor: &str) -> Result<Demand, ServerError>;

    async fn change_status(
        &self,
        demand: &Demand,
        next: DemandStatus,
        actor: &str,
    ) -> Result<Demand, ServerError>;

    async fn update_details(
        &self,
        demand: &Demand,
        due_date: Option<NaiveDate>,
        notes: Option<String>,
        actor: &str,
    ) -> Result<Demand, ServerError>;

    async fn delete(&self, demand: &Demand, actor: &str) -> Result<(), ServerError>;

    /// Uploads a file under the demand's process folder and returns its key.
    async fn attach_file(
        &self,
        demand: &Demand,
        local_path: &Path,
        actor: &str,
    ) -> Result<String, ServerError>;
}

pub(crate) struct DemandsUsecaseImpl<
    R1 = DemandsRepositoryImpl,
    R2 = NotificationsRepositoryImpl,
    S = FileStorageImpl,
> where
    R1: DemandsRepository,
    R2: NotificationsRepository,
    S: FileStorage,
{
    demands_repository: R1,
    notifications_repository: R2,
    file_storage: S,
    org_id: String,
}

fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

impl<R1, R2, S> DemandsUsecaseImpl<R1, R2, S>
where
    R1: DemandsRepository,
    R2: NotificationsRepository,
    S: FileStorage,
{
    pub(crate) fn new(
        demands_repository: R1,
        notifications_repository: R2,
        file_storage: S,
        org_id: &str,
    ) -> Self {
        Self {
            demands_repository,
            notifications_repository,
            file_storage,
            org_id: org_id.to_string(),
        }
    }

    /// Notifications are informative; a failure here never fails the action.
    async fn notify(&self, event: &str, message: String, actor: &str, demand: &Demand) {
        let notification = NewNotification {
            message,
            actor: Some(actor.to_string()).filter(|a| !a.is_empty()),
            module: ANVISA_MODULE.to_string(),
            event: event.to_string(),
        };
        if let Err(e) = self.notifications_repository.create(&notification).await {
            tracing::warn!(
                org_id = %self.org_id,
                client_id = demand.client_id,
                request_id = %demand.id,
                action = event,
                error = ?e,
                "failed to publish notification"
            );
        }
    }
}

#[async_trait]
impl<R1, R2, S> DemandsUsecase for DemandsUsecaseImpl<R1, R2, S>
where
    R1: DemandsRepository,
    R2: NotificationsRepository,
    S: FileStorage,
{
    async fn list_all(&self) -> Result<Vec<Demand>, ServerError> {
        self.demands_repository.list_all().await
    }

    async fn list_for_client(&self, client_id: ClientId) -> Result<Vec<Demand>, ServerError> {
        self.demands_repository.list_for_client(client_id).await
    }

    async fn create(&self, new_demand: &NewDemand, actor: &str) -> Result<Demand, ServerError> {
        let request_type = new_demand.request_type.label();
        let existing = self
            .demands_repository
            .list_for_client(new_demand.client_id)
            .await?;
        ensure_no_open_duplicate(&existing, new_demand.client_id, request_type)?;

        let payload = DemandPayload {
            due_date: new_demand.due_date,
            notes: new_demand.notes.clone().filter(|n| !n.trim().is_empty()),
            created_by: Some(actor.to_string()),
            ..Default::default()
        };
        let demand = self
            .demands_repository
            .create(new_demand.client_id, request_type, &payload)
            .await?;
        tracing::info!(
            org_id = %self.org_id,
            client_id = demand.client_id,
            request_id = %demand.id,
            action = "demand.create",
            "demand created"
        );
        self.notify(
            "created",
            format!(
                "Nova demanda '{}' para o cliente #{}.",
                request_type, demand.client_id
            ),
            actor,
            &demand,
        )
        .await;
        Ok(demand)
    }

    async fn change_status(
        &self,
        demand: &Demand,
        next: DemandStatus,
        actor: &str,
    ) -> Result<Demand, ServerError> {
        if !demand.status.can_transition_to(next) {
            return Err(InvalidStatusTransition::new(
                demand.status.label(),
                next.label(),
            ));
        }
        let mut payload = demand.payload.clone();
        payload.updated_by = Some(actor.to_string());
        let updated = self
            .demands_repository
            .update_status(&demand.id, next, &payload)
            .await?;
        tracing::info!(
            org_id = %self.org_id,
            client_id = demand.client_id,
            request_id = %demand.id,
            action = "demand.status",
            from = demand.status.value(),
            to = next.value(),
            "demand status changed"
        );
        self.notify(
            "status_changed",
            format!(
                "Demanda '{}' do cliente #{}: {} → {}.",
                demand.request_type,
                demand.client_id,
                demand.status.label(),
                next.label()
            ),
            actor,
            &updated,
        )
        .await;
        Ok(updated)
    }

    async fn update_details(
        &self,
        demand: &Demand,
        due_date: Option<NaiveDate>,
        notes: Option<String>,
        actor: &str,
    ) -> Result<Demand, ServerError> {
        let mut payload = demand.payload.clone();
        payload.due_date = due_date;
        payload.notes = notes.filter(|n| !n.trim().is_empty());
        payload.updated_by = Some(actor.to_string());
        self.demands_repository
            .update_payload(&demand.id, &payload)
            .await
    }

    async fn delete(&self, demand: &Demand, actor: &str) -> Result<(), ServerError> {
        self.demands_repository.delete(&demand.id).await?;
        tracing::info!(
            org_id = %self.org_id,
            client_id = demand.client_id,
            request_id = %demand.id,
            action = "demand.delete",
            actor,
            "demand deleted"
        );
        Ok(())
    }

    async fn attach_file(
        &self,
        demand: &Demand,
        local_path: &Path,
        actor: &str,
    ) -> Result<String, ServerError> {
        let filename = local_path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| "arquivo".to_string());
        let key = demand_storage_key(
            &self.org_id,
            demand.client_id,
            &demand.request_type,
            &filename,
        );
        let stored = self
            .file_storage
            .upload_file(local_path, &key, content_type_for(local_path))
            .await?;
        tracing::info!(
            org_id = %self.org_id,
            client_id = demand.client_id,
            request_id = %demand.id,
            action = "demand.attach",
            actor,
            key = %stored,
            "file attached"
        );
        Ok(stored)
    }
}
