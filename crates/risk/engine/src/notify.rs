//! Transition events and notification sinks
//!
//! Sinks are a side channel. The engine logs delivery failures and carries
//! on; a transition that was saved is never rolled back because a sink
//! failed.

use crate::error::NotifyError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use risk_types::{ActionKey, Phase, RiskId, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Record of one applied transition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEvent {
    pub risk_id: RiskId,
    pub action: ActionKey,
    /// Compound state before the transition
    pub from: String,
    /// Compound state after the transition
    pub to: String,
    pub phase: Phase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<UserId>,
    pub occurred_at: DateTime<Utc>,
    /// Version the Risk was saved at
    pub version: u64,
}

impl WorkflowEvent {
    pub fn describe(&self) -> String {
        format!("{}: {} -> {}", self.action, self.from, self.to)
    }
}

/// Receives workflow events
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, event: &WorkflowEvent) -> Result<(), NotifyError>;
}

/// Logs every event through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl NotificationSink for TracingSink {
    async fn notify(&self, event: &WorkflowEvent) -> Result<(), NotifyError> {
        tracing::info!(
            risk_id = %event.risk_id,
            action = %event.action,
            from = %event.from,
            to = %event.to,
            version = event.version,
            "Workflow event"
        );
        Ok(())
    }
}

/// Publishes events on a broadcast channel for live subscribers
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<WorkflowEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl NotificationSink for BroadcastSink {
    async fn notify(&self, event: &WorkflowEvent) -> Result<(), NotifyError> {
        // no subscribers is not an error
        let _ = self.tx.send(event.clone());
        Ok(())
    }
}

/// Forwards each event to every inner sink
#[derive(Clone, Default)]
pub struct FanoutSink {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl NotificationSink for FanoutSink {
    /// Every sink is tried; the first failure is returned
    async fn notify(&self, event: &WorkflowEvent) -> Result<(), NotifyError> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(err) = sink.notify(event).await {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn event() -> WorkflowEvent {
        WorkflowEvent {
            risk_id: RiskId::new("r1"),
            action: ActionKey::Validate,
            from: "status=risk_identified".into(),
            to: "status=actual_risk".into(),
            phase: Phase::Intake,
            actor: Some(UserId::new("grc")),
            occurred_at: Utc::now(),
            version: 1,
        }
    }

    struct FailingSink;

    #[async_trait]
    impl NotificationSink for FailingSink {
        async fn notify(&self, _event: &WorkflowEvent) -> Result<(), NotifyError> {
            Err(NotifyError::Delivery("webhook down".into()))
        }
    }

    #[derive(Default)]
    struct CountingSink(AtomicUsize);

    #[async_trait]
    impl NotificationSink for CountingSink {
        async fn notify(&self, _event: &WorkflowEvent) -> Result<(), NotifyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_broadcast_delivers_to_subscribers() {
        let sink = BroadcastSink::new(8);
        let mut rx = sink.subscribe();
        sink.notify(&event()).await.unwrap();
        let received = rx.recv().await.unwrap();
        assert_eq!(received.action, ActionKey::Validate);
    }

    #[tokio::test]
    async fn test_broadcast_without_subscribers() {
        let sink = BroadcastSink::new(8);
        assert!(sink.notify(&event()).await.is_ok());
    }

    #[tokio::test]
    async fn test_fanout_continues_past_failure() {
        let counter = Arc::new(CountingSink::default());
        let fanout = FanoutSink::new()
            .with_sink(Arc::new(FailingSink))
            .with_sink(counter.clone());
        assert_eq!(fanout.len(), 2);

        assert!(fanout.notify(&event()).await.is_err());
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            event().describe(),
            "validate: status=risk_identified -> status=actual_risk"
        );
    }
}
