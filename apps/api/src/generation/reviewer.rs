//! Reviewer — scores the drafted proposal from a client's perspective and
//! can send it back to the writer.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{budget_range, REVIEWER_PROMPT_TEMPLATE, REVIEWER_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::models::job::JobPost;
use crate::models::plan::ExecutionPlan;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalReview {
    /// 0 to 10.
    pub overall_score: f64,
    pub would_shortlist: bool,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub improvement_suggestions: Vec<String>,
    /// 0 to 100.
    pub estimated_win_probability: f64,
    pub requires_revision: bool,
    #[serde(default)]
    pub feedback_for_writer: Option<String>,
}

pub async fn review_proposal(
    llm: &LlmClient,
    job: &JobPost,
    proposal_text: &str,
    plan: &ExecutionPlan,
) -> Result<ProposalReview, AppError> {
    let prompt = REVIEWER_PROMPT_TEMPLATE
        .replace("{job_title}", &job.title)
        .replace("{job_description}", &job.description)
        .replace("{budget_range}", &budget_range(job.budget_min, job.budget_max))
        .replace("{proposal_text}", proposal_text)
        .replace("{total_cost}", &format!("{:.2}", plan.total_cost))
        .replace("{total_hours}", &plan.total_hours.to_string());

    let system = format!("{REVIEWER_SYSTEM} {JSON_ONLY_INSTRUCTION}");
    let review: ProposalReview = llm
        .call_json(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("proposal review failed: {e}")))?;

    info!(
        "Proposal reviewed: score={}/10, shortlist={}, requires_revision={}",
        review.overall_score, review.would_shortlist, review.requires_revision
    );
    Ok(review)
}
