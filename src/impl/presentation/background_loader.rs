use std::{
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use fractic_server_error::ServerError;
use tokio::{sync::Mutex, task::JoinHandle};

#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// Latest load; the caller should apply it.
    Applied(T),
    /// A newer load was started while this one ran. Its result is dropped.
    Superseded,
    Failed(ServerError),
}

/// Runs list fetches off the caller's thread, one at a time. Only the most
/// recently started fetch is applied. In-flight fetches are never cancelled.
#[derive(Clone, Default)]
pub struct BackgroundLoader {
    seq: Arc<AtomicU64>,
    worker: Arc<Mutex<()>>,
}

impl BackgroundLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest_ticket(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }

    pub fn spawn<T, F, Fut>(&self, fetch: F) -> JoinHandle<LoadOutcome<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ServerError>> + Send,
    {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let seq = Arc::clone(&self.seq);
        let worker = Arc::clone(&self.worker);
        tokio::spawn(async move {
            let _slot = worker.lock().await;
            let result = fetch().await;
            if seq.load(Ordering::SeqCst) != ticket {
                tracing::debug!(ticket, "discarding superseded load");
                return LoadOutcome::Superseded;
            }
            match result {
                Ok(value) => LoadOutcome::Applied(value),
                Err(e) => {
                    tracing::warn!(ticket, error = ?e, "background load failed");
                    LoadOutcome::Failed(e)
                }
            }
        })
    }
}
