//! Risk persistence seam

use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use risk_types::{Risk, RiskId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Load and persist Risk aggregates.
///
/// `save` is a compare-and-swap on [`Risk::version`]: it succeeds only when
/// the stored version still equals `expected_version`, and stores the Risk
/// with the version bumped by one.
#[async_trait]
pub trait RiskStore: Send + Sync {
    /// Get a risk by ID
    async fn get(&self, id: &RiskId) -> StoreResult<Option<Risk>>;

    /// List all risks, oldest first
    async fn list(&self) -> StoreResult<Vec<Risk>>;

    /// Store a new risk at version 0
    async fn insert(&self, risk: Risk) -> StoreResult<Risk>;

    /// Replace a risk if nobody else wrote it since `expected_version`
    async fn save(&self, risk: Risk, expected_version: u64) -> StoreResult<Risk>;
}

/// In-memory store for development and testing
#[derive(Debug, Clone, Default)]
pub struct InMemoryRiskStore {
    risks: Arc<RwLock<HashMap<RiskId, Risk>>>,
}

impl InMemoryRiskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.risks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.risks.read().await.is_empty()
    }
}

#[async_trait]
impl RiskStore for InMemoryRiskStore {
    async fn get(&self, id: &RiskId) -> StoreResult<Option<Risk>> {
        let risks = self.risks.read().await;
        Ok(risks.get(id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Risk>> {
        let risks = self.risks.read().await;
        let mut all: Vec<Risk> = risks.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn insert(&self, mut risk: Risk) -> StoreResult<Risk> {
        let mut risks = self.risks.write().await;
        if risks.contains_key(&risk.id) {
            return Err(StoreError::AlreadyExists(risk.id));
        }
        risk.version = 0;
        risks.insert(risk.id.clone(), risk.clone());
        Ok(risk)
    }

    async fn save(&self, mut risk: Risk, expected_version: u64) -> StoreResult<Risk> {
        let mut risks = self.risks.write().await;
        let current = risks
            .get(&risk.id)
            .ok_or_else(|| StoreError::NotFound(risk.id.clone()))?;

        if current.version != expected_version {
            return Err(StoreError::VersionConflict {
                risk_id: risk.id.clone(),
                expected: expected_version,
                actual: current.version,
            });
        }

        risk.version = expected_version + 1;
        risks.insert(risk.id.clone(), risk.clone());
        Ok(risk)
    }
}
