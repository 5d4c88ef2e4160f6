//! Risk Workflow Domain Types
//!
//! A Risk moves through three phases (intake, assessment, treatment) under
//! the control of a single state machine. These types describe the records
//! and the commands that move them; the engine crate decides which commands
//! are legal.
//!
//! # Key Concepts
//!
//! - **Risk**: The root aggregate. Carries its own intake status, the four
//!   role fields, and at most one Assessment and one Treatment.
//! - **Assessment**: The assessor's analysis, reviewed and approved by GRC.
//! - **Treatment**: The Risk Owner's decision and, for mitigations, the
//!   progress of the mitigation work.
//! - **Phase**: Derived from the compound status, never stored.
//! - **ActionKey**: The name of an operator action; the state machine
//!   reports which keys are available for a given risk.
//! - **WorkflowCommand**: An action key together with its typed payload.
//!
//! # Design Principles
//!
//! 1. Every status set has exactly one authoritative enum.
//! 2. Payload validation is field-level and independent of state.
//! 3. User references are weak: they are resolved on write, never joined.

#![deny(unsafe_code)]

mod action;
mod assessment;
mod command;
mod errors;
mod ids;
mod risk;
mod scoring;
mod status;
mod treatment;

pub use action::*;
pub use assessment::*;
pub use command::*;
pub use errors::*;
pub use ids::*;
pub use risk::*;
pub use scoring::*;
pub use status::*;
pub use treatment::*;
