pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::history;
use crate::manifest::handle_validate_manifest;
use crate::profiles;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Profiles
        .route("/api/v1/profiles", get(profiles::handle_list_profiles))
        .route(
            "/api/v1/profiles/:name",
            get(profiles::handle_get_profile).put(profiles::handle_save_profile),
        )
        // Templates
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route(
            "/api/v1/templates/validate",
            post(templates::handle_validate_template),
        )
        .route(
            "/api/v1/templates/:name",
            get(templates::handle_get_template).put(templates::handle_save_template),
        )
        .route(
            "/api/v1/templates/:name/preview",
            post(templates::handle_preview_template),
        )
        // Dependency manifest
        .route("/api/v1/manifest/validate", post(handle_validate_manifest))
        // Proposals
        .route(
            "/api/v1/proposals/generate",
            post(generation::handle_generate),
        )
        .route(
            "/api/v1/proposals/history",
            get(history::handle_history),
        )
        .route(
            "/api/v1/proposals/metrics",
            get(history::handle_metrics),
        )
        .route(
            "/api/v1/proposals/:id/status",
            patch(history::handle_update_status),
        )
        .with_state(state)
}
