//! HTTP handlers for freelancer profile management.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::profile::FreelancerProfile;
use crate::state::AppState;

/// GET /api/v1/profiles
pub async fn handle_list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let names = state.store.list_profiles().await?;
    Ok(Json(json!({ "profiles": names })))
}

/// GET /api/v1/profiles/:name
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<FreelancerProfile>, AppError> {
    let profile = state.store.load_profile(&name).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profiles/:name
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(profile): Json<FreelancerProfile>,
) -> Result<Json<Value>, AppError> {
    if profile.hourly_rate <= 0.0 {
        return Err(AppError::Validation(
            "hourly_rate must be positive".to_string(),
        ));
    }
    if profile.skills.is_empty() {
        return Err(AppError::Validation(
            "profile must list at least one skill".to_string(),
        ));
    }
    state.store.save_profile(&name, &profile).await?;
    Ok(Json(json!({ "saved": name })))
}
