//! Server setup and lifecycle management

use crate::api::{create_router, AppState};
use crate::config::{DaemonConfig, DirectoryConfig};
use crate::error::{DaemonError, DaemonResult};
use crate::storage::{build_storage, EventLog};
use axum::Router;
use risk_engine::{
    BroadcastSink, DirectoryUser, FanoutSink, InMemoryUserDirectory, OpenDirectory,
    ProvenanceTracker, RiskWorkflowEngine, TracingSink, UserDirectory,
};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Risk workflow daemon server
pub struct Server {
    config: DaemonConfig,
    state: AppState,
}

impl Server {
    /// Create a new server with the given configuration
    pub async fn new(config: DaemonConfig) -> DaemonResult<Self> {
        let storage = build_storage(&config.storage).await?;
        let directory = build_directory(&config.directory);

        let provenance = ProvenanceTracker::new();
        let events = BroadcastSink::new(config.server.event_channel_capacity.max(1));
        let mut sink = FanoutSink::new()
            .with_sink(Arc::new(provenance.clone()))
            .with_sink(Arc::new(events.clone()))
            .with_sink(Arc::new(TracingSink));

        if let Some((log, writer)) = storage.event_log {
            restore_history(&provenance, log.as_ref()).await?;
            sink = sink.with_sink(writer);
        }

        let engine = RiskWorkflowEngine::new(storage.risks, directory, Arc::new(sink))
            .with_config(config.workflow.into());

        Ok(Self {
            state: AppState::new(engine, provenance, events),
            config,
        })
    }

    /// The HTTP application, without binding a socket
    pub fn router(&self) -> Router {
        create_router(self.state.clone(), &self.config.server)
    }

    /// Run the server
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let app = self.router();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(
            phase_mode = ?self.config.workflow.phase_mode,
            "Risk daemon listening on {}",
            addr
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("Risk daemon shutting down");
        Ok(())
    }
}

/// Replay the persisted event log into the tracker
async fn restore_history(provenance: &ProvenanceTracker, log: &dyn EventLog) -> DaemonResult<()> {
    let restored = provenance.restore(log.load_events().await?).await;
    tracing::info!(restored, "Restored transition history");
    Ok(())
}

fn build_directory(config: &DirectoryConfig) -> Arc<dyn UserDirectory> {
    match config {
        DirectoryConfig::Open => {
            tracing::warn!("Open user directory: any non-blank user id resolves");
            Arc::new(OpenDirectory)
        }
        DirectoryConfig::Static { users } => {
            tracing::info!(users = users.len(), "Static user directory");
            Arc::new(InMemoryUserDirectory::with_users(
                users.iter().cloned().map(DirectoryUser::from),
            ))
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
