use std::path::Path;

use chrono::NaiveDate;
use fractic_server_error::ServerError;

use super::utils::user_message;
use crate::{
    domain::usecases::{
        clients_usecase::ClientsUsecase, demands_usecase::DemandsUsecase,
        notifications_usecase::NotificationsUsecase,
    },
    entities::{
        Client, ClientDraft, ClientId, Demand, DemandStatus, NewDemand, Notification,
        NotificationId,
    },
};

/// Result of a user action as the front-end shows it.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<T> {
    Success(T),
    Failure(String),
}

impl<T> ActionOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ActionOutcome::Success(_) => None,
            ActionOutcome::Failure(m) => Some(m),
        }
    }

    pub fn ok(self) -> Option<T> {
        match self {
            ActionOutcome::Success(v) => Some(v),
            ActionOutcome::Failure(_) => None,
        }
    }
}

struct Context<'a> {
    org_id: &'a str,
    client_id: Option<ClientId>,
    request_id: Option<&'a str>,
    action: &'static str,
}

fn outcome<T>(result: Result<T, ServerError>, ctx: Context<'_>) -> ActionOutcome<T> {
    match result {
        Ok(v) => ActionOutcome::Success(v),
        Err(e) => {
            tracing::error!(
                org_id = ctx.org_id,
                client_id = ?ctx.client_id,
                request_id = ?ctx.request_id,
                action = ctx.action,
                error = ?e,
                "action failed"
            );
            ActionOutcome::Failure(user_message(&e))
        }
    }
}

// --

pub struct ClientsController<'a> {
    clients: &'a dyn ClientsUsecase,
    org_id: &'a str,
    actor: &'a str,
}

impl<'a> ClientsController<'a> {
    pub fn new(clients: &'a dyn ClientsUsecase, org_id: &'a str, actor: &'a str) -> Self {
        Self {
            clients,
            org_id,
            actor,
        }
    }

    fn ctx(&self, client_id: Option<ClientId>, action: &'static str) -> Context<'a> {
        Context {
            org_id: self.org_id,
            client_id,
            request_id: None,
            action,
        }
    }

    pub async fn list_active(&self) -> ActionOutcome<Vec<Client>> {
        outcome(self.clients.list_active().await, self.ctx(None, "client.list"))
    }

    pub async fn list_deleted(&self) -> ActionOutcome<Vec<Client>> {
        outcome(
            self.clients.list_deleted().await,
            self.ctx(None, "client.list_deleted"),
        )
    }

    /// Re-reads one client so its row can be refreshed in place.
    pub async fn reload(&self, id: ClientId) -> ActionOutcome<Client> {
        outcome(self.clients.get(id).await, self.ctx(Some(id), "client.reload"))
    }

    pub async fn create(&self, draft: &ClientDraft) -> ActionOutcome<Client> {
        outcome(
            self.clients.create(draft, self.actor).await,
            self.ctx(None, "client.create"),
        )
    }

    pub async fn update(&self, id: ClientId, draft: &ClientDraft) -> ActionOutcome<Client> {
        outcome(
            self.clients.update(id, draft, self.actor).await,
            self.ctx(Some(id), "client.update"),
        )
    }

    pub async fn delete(&self, id: ClientId) -> ActionOutcome<()> {
        outcome(
            self.clients.delete(id, self.actor).await,
            self.ctx(Some(id), "client.delete"),
        )
    }

    pub async fn restore(&self, id: ClientId) -> ActionOutcome<()> {
        outcome(
            self.clients.restore(id, self.actor).await,
            self.ctx(Some(id), "client.restore"),
        )
    }
}

// --

pub struct DemandsController<'a> {
    demands: &'a dyn DemandsUsecase,
    org_id: &'a str,
    actor: &'a str,
}

impl<'a> DemandsController<'a> {
    pub fn new(demands: &'a dyn DemandsUsecase, org_id: &'a str, actor: &'a str) -> Self {
        Self {
            demands,
            org_id,
            actor,
        }
    }

    fn ctx<'b>(&'b self, demand: Option<&'b Demand>, action: &'static str) -> Context<'b> {
        Context {
            org_id: self.org_id,
            client_id: demand.map(|d| d.client_id),
            request_id: demand.map(|d| d.id.as_str()),
            action,
        }
    }

    pub async fn list_all(&self) -> ActionOutcome<Vec<Demand>> {
        outcome(self.demands.list_all().await, self.ctx(None, "demand.list"))
    }

    pub async fn list_for_client(&self, client_id: ClientId) -> ActionOutcome<Vec<Demand>> {
        let mut ctx = self.ctx(None, "demand.list");
        ctx.client_id = Some(client_id);
        outcome(self.demands.list_for_client(client_id).await, ctx)
    }

    pub async fn create(&self, new_demand: &NewDemand) -> ActionOutcome<Demand> {
        let mut ctx = self.ctx(None, "demand.create");
        ctx.client_id = Some(new_demand.client_id);
        outcome(self.demands.create(new_demand, self.actor).await, ctx)
    }

    pub async fn change_status(&self, demand: &Demand, next: DemandStatus) -> ActionOutcome<Demand> {
        outcome(
            self.demands.change_status(demand, next, self.actor).await,
            self.ctx(Some(demand), "demand.status"),
        )
    }

    pub async fn update_details(
        &self,
        demand: &Demand,
        due_date: Option<NaiveDate>,
        notes: Option<String>,
    ) -> ActionOutcome<Demand> {
        outcome(
            self.demands
                .update_details(demand, due_date, notes, self.actor)
                .await,
            self.ctx(Some(demand), "demand.update"),
        )
    }

    pub async fn delete(&self, demand: &Demand) -> ActionOutcome<()> {
        outcome(
            self.demands.delete(demand, self.actor).await,
            self.ctx(Some(demand), "demand.delete"),
        )
    }

    pub async fn attach_file(&self, demand: &Demand, local_path: &Path) -> ActionOutcome<String> {
        outcome(
            self.demands
                .attach_file(demand, local_path, self.actor)
                .await,
            self.ctx(Some(demand), "demand.attach"),
        )
    }
}

// --

pub struct NotificationsController<'a> {
    notifications: &'a dyn NotificationsUsecase,
    org_id: &'a str,
}

impl<'a> NotificationsController<'a> {
    pub fn new(notifications: &'a dyn NotificationsUsecase, org_id: &'a str) -> Self {
        Self {
            notifications,
            org_id,
        }
    }

    fn ctx(&self, action: &'static str) -> Context<'a> {
        Context {
            org_id: self.org_id,
            client_id: None,
            request_id: None,
            action,
        }
    }

    pub async fn recent(&self, limit: usize) -> ActionOutcome<Vec<Notification>> {
        outcome(
            self.notifications.list_recent(limit).await,
            self.ctx("notification.list"),
        )
    }

    /// Zero when the count can't be fetched; the badge is informative only.
    pub async fn unread_count(&self) -> usize {
        outcome(
            self.notifications.unread_count().await,
            self.ctx("notification.count"),
        )
        .ok()
        .unwrap_or(0)
    }

    pub async fn mark_read(&self, ids: &[NotificationId]) -> ActionOutcome<()> {
        outcome(
            self.notifications.mark_read(ids).await,
            self.ctx("notification.mark_read"),
        )
    }

    pub async fn mark_all_read(&self) -> ActionOutcome<()> {
        outcome(
            self.notifications.mark_all_read().await,
            self.ctx("notification.mark_all_read"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::usecases::{
            clients_usecase::{fakes::*, ClientsUsecaseImpl},
            demands_usecase::fakes::{demand, usecase_with},
        },
        entities::DemandType,
    };

    #[tokio::test]
    async fn clients_controller_turns_errors_into_messages() {
        let usecase = ClientsUsecaseImpl::new(InMemoryClientsRepository::with(vec![client(
            1, "A",
        )]));
        let controller = ClientsController::new(&usecase, "org-1", "ana");

        let created = controller
            .create(&ClientDraft {
                razao_social: "Drogaria Nova".into(),
                ..Default::default()
            })
            .await;
        assert!(created.is_success());
        assert_eq!(created.ok().map(|c| c.id), Some(2));

        let rejected = controller.create(&ClientDraft::default()).await;
        assert!(!rejected.is_success());
        assert!(rejected.message().is_some_and(|m| !m.is_empty()));

        assert_eq!(
            controller.reload(2).await.ok().map(|c| c.razao_social),
            Some("Drogaria Nova".to_string())
        );
        assert!(!controller.reload(99).await.is_success());

        assert!(controller.delete(1).await.is_success());
        assert!(!controller.delete(1234).await.is_success());
        assert_eq!(controller.list_deleted().await.ok().map(|l| l.len()), Some(1));
    }

    #[tokio::test]
    async fn demands_controller_reports_duplicates() {
        let existing = demand(
            "d1",
            5,
            DemandType::CancelamentoAfe.label(),
            DemandStatus::Submitted,
        );
        let usecase = usecase_with(vec![existing.clone()]);
        let controller = DemandsController::new(&usecase, "org-1", "ana");

        let new_demand = NewDemand {
            client_id: 5,
            request_type: DemandType::CancelamentoAfe,
            due_date: None,
            notes: None,
        };
        let duplicate = controller.create(&new_demand).await;
        assert!(duplicate.message().is_some());

        let done = controller.change_status(&existing, DemandStatus::Done).await;
        assert_eq!(done.ok().map(|d| d.status), Some(DemandStatus::Done));
        assert!(controller.create(&new_demand).await.is_success());
        assert_eq!(controller.list_for_client(5).await.ok().map(|l| l.len()), Some(2));
    }
}
