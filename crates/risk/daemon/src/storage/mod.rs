//! Storage layer for riskd
//!
//! Picks the [`RiskStore`] backend named in configuration, along with a
//! durable event log when the backend provides one.

mod postgres;

pub use postgres::PostgresRiskStore;

use crate::config::StorageConfig;
use crate::error::DaemonResult;
use async_trait::async_trait;
use risk_engine::{InMemoryRiskStore, NotificationSink, RiskStore, StoreResult, WorkflowEvent};
use std::sync::Arc;

/// Persisted transition history, replayed into the provenance tracker at startup
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Every persisted event, in append order
    async fn load_events(&self) -> StoreResult<Vec<WorkflowEvent>>;
}

/// Configured backends
pub struct Storage {
    pub risks: Arc<dyn RiskStore>,
    /// Durable history. `None` keeps history process-local.
    pub event_log: Option<(Arc<dyn EventLog>, Arc<dyn NotificationSink>)>,
}

/// Build the configured storage
pub async fn build_storage(config: &StorageConfig) -> DaemonResult<Storage> {
    match config {
        StorageConfig::Memory => {
            tracing::info!("Using in-memory risk storage");
            Ok(Storage {
                risks: Arc::new(InMemoryRiskStore::new()),
                event_log: None,
            })
        }
        StorageConfig::Postgres {
            url,
            max_connections,
            connect_timeout_secs,
        } => {
            tracing::info!(max_connections, "Using PostgreSQL risk storage");
            let store =
                Arc::new(PostgresRiskStore::new(url, *max_connections, *connect_timeout_secs).await?);
            let log: Arc<dyn EventLog> = store.clone();
            let writer: Arc<dyn NotificationSink> = store.clone();
            Ok(Storage {
                risks: store,
                event_log: Some((log, writer)),
            })
        }
    }
}
