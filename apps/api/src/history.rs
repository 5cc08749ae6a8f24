//! Proposal history — SQLite-backed records of every generated proposal and
//! the success metrics derived from them.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::models::history::{ProposalHistoryRow, ProposalOutput, ProposalStatus, SuccessMetrics};
use crate::state::AppState;

const HISTORY_COLUMNS: &str = "id, job_title, client_name, generated_at, status, \
    budget_proposed, final_cost, notes, quality_score, win_probability";

/// Inserts a freshly generated proposal into history (status `pending`).
pub async fn record_proposal(
    pool: &SqlitePool,
    id: &str,
    job_title: &str,
    client_name: Option<&str>,
    generated_at: DateTime<Utc>,
    output: &ProposalOutput,
) -> Result<(), AppError> {
    let plan_json = serde_json::to_string(&output.execution_plan)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing plan: {e}")))?;

    sqlx::query(
        r#"
        INSERT OR REPLACE INTO proposals
            (id, job_title, client_name, generated_at, status,
             budget_proposed, final_cost, notes, proposal_text,
             execution_plan_json, quality_score, win_probability)
        VALUES (?, ?, ?, ?, ?, ?, NULL, NULL, ?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(job_title)
    .bind(client_name)
    .bind(generated_at)
    .bind(ProposalStatus::Pending)
    .bind(output.execution_plan.total_cost)
    .bind(&output.proposal_text)
    .bind(plan_json)
    .bind(output.quality_score)
    .bind(output.estimated_win_probability)
    .execute(pool)
    .await?;

    info!("Proposal recorded in history: {id}");
    Ok(())
}

/// Recent proposals, newest first.
pub async fn recent_proposals(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<ProposalHistoryRow>, AppError> {
    let rows = sqlx::query_as::<_, ProposalHistoryRow>(&format!(
        "SELECT {HISTORY_COLUMNS} FROM proposals ORDER BY generated_at DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Updates a proposal's status and, optionally, its final cost and notes.
/// Returns the updated row, or `NotFound` if the id is unknown.
pub async fn update_status(
    pool: &SqlitePool,
    id: &str,
    status: ProposalStatus,
    final_cost: Option<f64>,
    notes: Option<&str>,
) -> Result<ProposalHistoryRow, AppError> {
    let result = sqlx::query(
        "UPDATE proposals SET status = ?, final_cost = COALESCE(?, final_cost), \
         notes = COALESCE(?, notes) WHERE id = ?",
    )
    .bind(status)
    .bind(final_cost)
    .bind(notes)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("proposal '{id}' not found")));
    }

    let row = sqlx::query_as::<_, ProposalHistoryRow>(&format!(
        "SELECT {HISTORY_COLUMNS} FROM proposals WHERE id = ?"
    ))
    .bind(id)
    .fetch_one(pool)
    .await?;

    info!("Proposal {id} status updated to {:?}", row.status);
    Ok(row)
}

/// Success metrics over the last `days` days.
pub async fn success_metrics(pool: &SqlitePool, days: i64) -> Result<SuccessMetrics, AppError> {
    let cutoff = Utc::now() - Duration::days(days);

    let total_proposals: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM proposals WHERE generated_at >= ?")
            .bind(cutoff)
            .fetch_one(pool)
            .await?;

    let accepted_proposals: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM proposals WHERE generated_at >= ? AND status = ?",
    )
    .bind(cutoff)
    .bind(ProposalStatus::Accepted)
    .fetch_one(pool)
    .await?;

    let average_quality_score: Option<f64> = sqlx::query_scalar(
        "SELECT AVG(quality_score) FROM proposals \
         WHERE generated_at >= ? AND quality_score IS NOT NULL",
    )
    .bind(cutoff)
    .fetch_one(pool)
    .await?;

    let average_budget: Option<f64> =
        sqlx::query_scalar("SELECT AVG(budget_proposed) FROM proposals WHERE generated_at >= ?")
            .bind(cutoff)
            .fetch_one(pool)
            .await?;

    let total_revenue: Option<f64> = sqlx::query_scalar(
        "SELECT SUM(COALESCE(final_cost, budget_proposed)) FROM proposals \
         WHERE generated_at >= ? AND status = ?",
    )
    .bind(cutoff)
    .bind(ProposalStatus::Accepted)
    .fetch_one(pool)
    .await?;

    let win_rate = if total_proposals > 0 {
        accepted_proposals as f64 / total_proposals as f64 * 100.0
    } else {
        0.0
    };

    Ok(SuccessMetrics {
        total_proposals,
        accepted_proposals,
        win_rate,
        average_quality_score: average_quality_score.unwrap_or(0.0),
        average_budget: average_budget.unwrap_or(0.0),
        total_revenue: total_revenue.unwrap_or(0.0),
        period_days: days,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MetricsParams {
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ProposalStatus,
    #[serde(default)]
    pub final_cost: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// GET /api/v1/proposals/history?limit=
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Value>, AppError> {
    let limit = params.limit.unwrap_or(10).clamp(1, 100);
    let proposals = recent_proposals(&state.db, limit).await?;
    Ok(Json(json!({ "proposals": proposals })))
}

/// PATCH /api/v1/proposals/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ProposalHistoryRow>, AppError> {
    let row = update_status(
        &state.db,
        &id,
        request.status,
        request.final_cost,
        request.notes.as_deref(),
    )
    .await?;
    Ok(Json(row))
}

/// GET /api/v1/proposals/metrics?days=
pub async fn handle_metrics(
    State(state): State<AppState>,
    Query(params): Query<MetricsParams>,
) -> Result<Json<SuccessMetrics>, AppError> {
    let days = params.days.unwrap_or(30).clamp(1, 365);
    let metrics = success_metrics(&state.db, days).await?;
    Ok(Json(metrics))
}
