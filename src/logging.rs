//! Process-wide `tracing` subscriber.
//!
//! The filter comes from `RUST_LOG` and defaults to `info`. Initialization
//! runs once; later calls are no-ops, so tests and embedders can call it
//! freely.

use std::sync::OnceLock;

use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

pub fn init_logging() {
    LOGGING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_logging();
        init_logging();
        tracing::info!("logging initialized");
    }
}
