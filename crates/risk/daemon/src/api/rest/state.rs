//! Application state for API handlers

use risk_engine::{BroadcastSink, ProvenanceTracker, RiskWorkflowEngine};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Workflow engine
    pub engine: RiskWorkflowEngine,

    /// Per-risk transition history, fed by the engine's sink
    pub provenance: ProvenanceTracker,

    /// Live transition events, fed by the engine's sink
    pub events: BroadcastSink,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        engine: RiskWorkflowEngine,
        provenance: ProvenanceTracker,
        events: BroadcastSink,
    ) -> Self {
        Self {
            engine,
            provenance,
            events,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
        }
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        format_uptime((chrono::Utc::now() - self.started_at).num_seconds())
    }
}

fn format_uptime(secs: i64) -> String {
    match secs {
        s if s < 60 => format!("{}s", s),
        s if s < 3_600 => format!("{}m {}s", s / 60, s % 60),
        s if s < 86_400 => format!("{}h {}m", s / 3_600, (s % 3_600) / 60),
        s => format!("{}d {}h", s / 86_400, (s % 86_400) / 3_600),
    }
}
