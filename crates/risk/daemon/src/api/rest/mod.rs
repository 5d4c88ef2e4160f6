//! REST API: `/api/v1` routes, shared state and handlers

pub mod handlers;
pub mod router;
pub mod state;
