//! Risk workflow daemon library
//!
//! Hosts the risk workflow engine behind a REST API. The `riskd` binary is
//! a thin wrapper that parses flags, installs logging and runs a [`Server`].

pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod storage;

pub use config::DaemonConfig;
pub use error::{ApiError, ApiResult, DaemonError, DaemonResult};
pub use server::Server;
