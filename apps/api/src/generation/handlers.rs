//! HTTP handler for proposal generation.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::orchestrator::Orchestrator;
use crate::history::record_proposal;
use crate::models::history::ProposalOutput;
use crate::models::job::JobPost;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub job_post: JobPost,
    /// Profile name as stored under the profiles directory.
    pub profile_name: String,
    /// Template name as stored under the templates directory.
    pub template_name: String,
    #[serde(default)]
    pub max_budget: Option<f64>,
    /// Defaults to the configured error margin when omitted.
    #[serde(default)]
    pub error_margin: Option<f64>,
    #[serde(default)]
    pub express_mode: bool,
    /// When set, nothing is written to disk or history.
    #[serde(default)]
    pub sandbox: bool,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub id: String,
    pub express_mode: bool,
    pub output_dir: Option<String>,
    #[serde(flatten)]
    pub output: ProposalOutput,
}

/// POST /api/v1/proposals/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if request.job_post.title.trim().is_empty() {
        return Err(AppError::Validation("job_post.title is required".to_string()));
    }
    if let Some(budget) = request.max_budget {
        if budget <= 0.0 {
            return Err(AppError::Validation("max_budget must be positive".to_string()));
        }
    }

    let profile = state.store.load_profile(&request.profile_name).await?;
    let template = state.store.load_template(&request.template_name).await?;
    let error_margin = request
        .error_margin
        .unwrap_or(state.config.default_error_margin);

    let mut orchestrator = Orchestrator::new(state.llm.clone(), &state.config);
    let output = if request.express_mode {
        orchestrator
            .generate_express(&request.job_post, &profile, &template)
            .await?
    } else {
        orchestrator
            .generate(
                &request.job_post,
                &profile,
                &template,
                request.max_budget,
                error_margin,
            )
            .await?
    };

    let id = Uuid::new_v4().to_string();
    let generated_at = Utc::now();
    let mut output_dir = None;

    if !request.sandbox {
        let dir = state
            .store
            .save_proposal_output(
                &output.proposal_text,
                &output.execution_plan,
                &request.job_post.title,
                generated_at,
            )
            .await?;
        output_dir = Some(dir.to_string_lossy().into_owned());

        record_proposal(
            &state.db,
            &id,
            &request.job_post.title,
            request.job_post.client_name.as_deref(),
            generated_at,
            &output,
        )
        .await?;
    } else {
        info!("Sandbox generation; skipping persistence");
    }

    Ok(Json(GenerateResponse {
        id,
        express_mode: request.express_mode,
        output_dir,
        output,
    }))
}
