use futures::{stream, StreamExt as _};

use super::utils::user_message;
use crate::{
    domain::usecases::clients_usecase::ClientsUsecase,
    entities::{ClientId, Connectivity},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Delete,
    Restore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchAvailability {
    pub delete: bool,
    pub restore: bool,
    pub export: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub kind: BatchKind,
    pub succeeded: Vec<ClientId>,
    /// Failed ids with the message shown to the user.
    pub failed: Vec<(ClientId, String)>,
}

pub struct BatchOperationsCoordinator<'a> {
    clients: &'a dyn ClientsUsecase,
}

impl BatchReport {
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        let verb = match self.kind {
            BatchKind::Delete => "excluído(s)",
            BatchKind::Restore => "restaurado(s)",
        };
        let mut text = format!("{} cliente(s) {}.", self.succeeded.len(), verb);
        if !self.failed.is_empty() {
            text.push_str(&format!(" {} falha(s):", self.failed.len()));
            for (id, message) in &self.failed {
                text.push_str(&format!("\n- #{id}: {message}"));
            }
        }
        text
    }
}

impl<'a> BatchOperationsCoordinator<'a> {
    pub fn new(clients: &'a dyn ClientsUsecase) -> Self {
        Self { clients }
    }

    /// Delete and restore write remotely and need a stable connection;
    /// export only needs rows.
    pub fn availability(selected: usize, connectivity: Connectivity) -> BatchAvailability {
        let writable = selected > 0 && connectivity == Connectivity::Online;
        BatchAvailability {
            delete: writable,
            restore: writable,
            export: selected > 0,
        }
    }

    /// Runs one request at a time; a failure does not stop the batch.
    pub async fn run(&self, kind: BatchKind, ids: &[ClientId], actor: &str) -> BatchReport {
        let results: Vec<_> = stream::iter(ids.iter().copied())
            .then(|id| async move {
                let result = match kind {
                    BatchKind::Delete => self.clients.delete(id, actor).await,
                    BatchKind::Restore => self.clients.restore(id, actor).await,
                };
                (id, result)
            })
            .collect()
            .await;

        let mut report = BatchReport {
            kind,
            succeeded: Vec::new(),
            failed: Vec::new(),
        };
        for (id, result) in results {
            match result {
                Ok(()) => report.succeeded.push(id),
                Err(e) => {
                    tracing::warn!(client_id = id, action = ?kind, error = ?e, "batch item failed");
                    report.failed.push((id, user_message(&e)));
                }
            }
        }
        tracing::info!(
            action = ?kind,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "batch finished"
        );
        report
    }

    pub async fn delete(&self, ids: &[ClientId], actor: &str) -> BatchReport {
        self.run(BatchKind::Delete, ids, actor).await
    }

    pub async fn restore(&self, ids: &[ClientId], actor: &str) -> BatchReport {
        self.run(BatchKind::Restore, ids, actor).await
    }
}
