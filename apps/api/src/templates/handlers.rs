//! HTTP handlers for template management.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::job::JobPost;
use crate::models::plan::ExecutionPlan;
use crate::state::AppState;
use crate::templates::render::{render, validate_template};
use crate::templates::variables::extract_variables;
use crate::templates::ProposalTemplate;

/// GET /api/v1/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let names = state.store.list_templates().await?;
    Ok(Json(json!({ "templates": names })))
}

/// GET /api/v1/templates/:name
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ProposalTemplate>, AppError> {
    let template = state.store.load_template(&name).await?;
    Ok(Json(template))
}

/// PUT /api/v1/templates/:name
///
/// The path segment wins over any `name` in the body. Templates whose
/// sections reference undeclared variables are rejected before saving.
pub async fn handle_save_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(mut template): Json<ProposalTemplate>,
) -> Result<Json<Value>, AppError> {
    template.name = name.clone();
    let unused = validate_template(&template)
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;
    state.store.save_template(&template).await?;
    Ok(Json(json!({ "saved": name, "unused_variables": unused })))
}

/// POST /api/v1/templates/validate
///
/// Validates a template without persisting it.
pub async fn handle_validate_template(
    Json(template): Json<ProposalTemplate>,
) -> Result<Json<Value>, AppError> {
    match validate_template(&template) {
        Ok(unused) => Ok(Json(json!({
            "valid": true,
            "unused_variables": unused,
        }))),
        Err(e) => Ok(Json(json!({
            "valid": false,
            "error": e.to_string(),
        }))),
    }
}

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub job_post: JobPost,
    /// Profile name as stored under the profiles directory.
    pub profile: String,
    /// Optional costed plan; totals are recomputed before rendering. Without
    /// one, plan-derived variables fall back to their empty-plan defaults.
    #[serde(default)]
    pub plan: Option<ExecutionPlan>,
}

/// POST /api/v1/templates/:name/preview
///
/// Renders the template directly from derived variables, no LLM involved.
/// Declared variables with no derivable value surface in the response and as
/// `[VARIABLE_NOT_PROVIDED]` markers in the rendered text.
pub async fn handle_preview_template(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<Value>, AppError> {
    let template = state.store.load_template(&name).await?;
    let profile = state.store.load_profile(&request.profile).await?;

    let mut plan = request
        .plan
        .unwrap_or_else(|| ExecutionPlan::from_tasks(vec![], vec![]));
    plan.recalculate_totals();

    let variables = extract_variables(&request.job_post, &profile, &plan);
    let unresolved: Vec<&String> = template
        .variables
        .iter()
        .filter(|v| !variables.contains_key(*v))
        .collect();

    let rendered = render(&template, &variables)
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    Ok(Json(json!({
        "template": name,
        "rendered": rendered,
        "unresolved_variables": unresolved,
    })))
}
