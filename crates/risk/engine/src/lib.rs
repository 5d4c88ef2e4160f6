//! Risk Workflow Engine
//!
//! Drives a Risk through intake, assessment and treatment. The engine
//! computes which actions are currently permitted, validates each command
//! against the compound state, and applies it atomically.
//!
//! # Architecture
//!
//! The [`RiskWorkflowEngine`] composes specialized components:
//!
//! - [`StateMachine`]: Precondition checks and transition effects
//! - [`derive_phase`]: Phase derivation from compound state
//! - [`available_actions`] / [`assignable_roles`]: Action gating
//! - [`RiskStore`]: Persistence with compare-and-swap saves
//! - [`UserDirectory`]: Resolves user references before they are written
//! - [`NotificationSink`]: Receives a [`WorkflowEvent`] per transition
//! - [`ProvenanceTracker`]: Per-risk ordered history of transitions
//!
//! # Example
//!
//! ```rust
//! use risk_engine::*;
//! use risk_types::*;
//! use std::sync::Arc;
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! rt.block_on(async {
//!     let engine = RiskWorkflowEngine::new(
//!         Arc::new(InMemoryRiskStore::new()),
//!         Arc::new(OpenDirectory),
//!         Arc::new(ProvenanceTracker::new()),
//!     );
//!
//!     let risk = engine
//!         .create_risk(
//!             CreateRiskPayload {
//!                 title: Some("Unencrypted backups".into()),
//!                 inherent_risk: Some(InherentRisk::High),
//!                 ..Default::default()
//!             },
//!             None,
//!         )
//!         .await
//!         .unwrap();
//!
//!     let risk = engine
//!         .execute(
//!             &risk.id,
//!             Some(risk.version),
//!             None,
//!             WorkflowCommand::Validate(ValidatePayload {
//!                 approved: Some(true),
//!                 reason: None,
//!                 risk_assessor_id: Some(UserId::new("assessor")),
//!             }),
//!         )
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(risk.status, RiskStatus::ActualRisk);
//!     assert_eq!(engine.available_actions(&risk), vec![ActionKey::StartAssessment]);
//! });
//! ```

#![deny(unsafe_code)]

pub mod actions;
pub mod directory;
pub mod engine;
pub mod error;
pub mod notify;
pub mod phase;
pub mod provenance_tracker;
pub mod state_machine;
pub mod store;

// Re-export main types
pub use actions::{assignable_roles, available_actions, can_assign};
pub use directory::{DirectoryUser, InMemoryUserDirectory, OpenDirectory, UserDirectory};
pub use engine::{EngineConfig, RiskWorkflowEngine, WorkflowView};
pub use error::{DirectoryError, DirectoryResult, NotifyError, StoreError, StoreResult};
pub use notify::{BroadcastSink, FanoutSink, NotificationSink, TracingSink, WorkflowEvent};
pub use phase::derive_phase;
pub use provenance_tracker::{ProvenanceRecord, ProvenanceTracker};
pub use state_machine::StateMachine;
pub use store::{InMemoryRiskStore, RiskStore};
