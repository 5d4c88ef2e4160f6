//! Provenance tracker: records every applied transition per risk
//!
//! Records are kept in application order and can be replayed to see
//! exactly how a risk reached its current state.

use crate::error::NotifyError;
use crate::notify::{NotificationSink, WorkflowEvent};
use async_trait::async_trait;
use risk_types::{ActionKey, RiskId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A single provenance entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvenanceRecord {
    /// Global sequence number across all risks
    pub sequence: u64,
    pub description: String,
    pub event: WorkflowEvent,
}

impl ProvenanceRecord {
    pub fn involves_action(&self, action: ActionKey) -> bool {
        self.event.action == action
    }
}

/// Tracks provenance events for all risks
#[derive(Debug, Clone, Default)]
pub struct ProvenanceTracker {
    events: Arc<RwLock<HashMap<RiskId, Vec<ProvenanceRecord>>>>,
    sequence: Arc<AtomicU64>,
}

impl ProvenanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a workflow event
    pub async fn record(&self, event: WorkflowEvent) {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(
            risk_id = %event.risk_id,
            action = %event.action,
            sequence,
            "Provenance recorded"
        );
        let record = ProvenanceRecord {
            sequence,
            description: event.describe(),
            event,
        };
        let mut events = self.events.write().await;
        events.entry(record.event.risk_id.clone()).or_default().push(record);
    }

    /// Rebuild history from a persisted log, oldest event first.
    ///
    /// Sequence numbers are reassigned in the order given.
    pub async fn restore(&self, events: impl IntoIterator<Item = WorkflowEvent>) -> usize {
        let mut restored = 0;
        for event in events {
            self.record(event).await;
            restored += 1;
        }
        restored
    }

    // ── Query methods ────────────────────────────────────────────────

    /// All records for a risk, oldest first
    pub async fn events_for(&self, risk_id: &RiskId) -> Vec<ProvenanceRecord> {
        self.events
            .read()
            .await
            .get(risk_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn event_count(&self, risk_id: &RiskId) -> usize {
        self.events.read().await.get(risk_id).map_or(0, Vec::len)
    }

    /// Records for a risk produced by one action
    pub async fn events_for_action(
        &self,
        risk_id: &RiskId,
        action: ActionKey,
    ) -> Vec<ProvenanceRecord> {
        self.events_for(risk_id)
            .await
            .into_iter()
            .filter(|r| r.involves_action(action))
            .collect()
    }

    /// Total records across all risks
    pub async fn total_events(&self) -> usize {
        self.events.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl NotificationSink for ProvenanceTracker {
    async fn notify(&self, event: &WorkflowEvent) -> Result<(), NotifyError> {
        self.record(event.clone()).await;
        Ok(())
    }
}
