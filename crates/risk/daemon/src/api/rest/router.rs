//! API Router configuration

use super::handlers;
use super::state::AppState;
use crate::config::ServerConfig;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Create the main API router
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let api_routes = Router::new()
        // Health and status
        .route("/health", get(handlers::health_check))
        .route("/status", get(handlers::daemon_status))
        // Risks
        .route("/risks", get(handlers::list_risks).post(handlers::create_risk))
        .route("/risks/:id", get(handlers::get_risk).patch(handlers::assign_role))
        .route("/risks/:id/workflow", get(handlers::get_workflow))
        .route("/risks/:id/events", get(handlers::get_risk_events))
        // Workflow actions
        .route("/risks/:id/validate", post(handlers::validate_risk))
        .route("/risks/:id/start-assessment", post(handlers::start_assessment))
        .route("/risks/:id/submit-assessment", post(handlers::submit_assessment))
        .route("/risks/:id/review-assessment", post(handlers::review_assessment))
        .route("/risks/:id/complete-revision", post(handlers::complete_revision))
        .route("/risks/:id/submit-treatment", post(handlers::submit_treatment))
        .route("/risks/:id/assign-approver", post(handlers::assign_approver))
        .route("/risks/:id/executive-approval", post(handlers::executive_approval))
        .route("/risks/:id/update-mitigation", post(handlers::update_mitigation))
        // Events
        .route("/events/stream", get(handlers::stream_events));

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.with_state(state)
}
