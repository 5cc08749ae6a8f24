//! Technical validator — checks the plan against the freelancer's actual
//! capabilities. Skipped entirely in express mode.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{TECHNICAL_PROMPT_TEMPLATE, TECHNICAL_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::models::job::JobPost;
use crate::models::plan::ExecutionPlan;
use crate::models::profile::FreelancerProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalValidation {
    pub feasible: bool,
    pub confidence_level: String,
    #[serde(default)]
    pub technical_risks: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    pub requires_revision: bool,
    #[serde(default)]
    pub feedback_for_translator: Option<String>,
}

pub async fn validate_feasibility(
    llm: &LlmClient,
    plan: &ExecutionPlan,
    profile: &FreelancerProfile,
    job: &JobPost,
) -> Result<TechnicalValidation, AppError> {
    let prompt = TECHNICAL_PROMPT_TEMPLATE
        .replace("{job_description}", &job.description)
        .replace("{skills_required}", &job.skills_required.join(", "))
        .replace("{skills}", &profile.skills.join(", "))
        .replace("{experience_years}", &profile.experience_years.to_string())
        .replace("{specializations}", &profile.specializations.join(", "))
        .replace("{plan_lines}", &format_plan(plan));

    let system = format!("{TECHNICAL_SYSTEM} {JSON_ONLY_INSTRUCTION}");
    let validation: TechnicalValidation = llm
        .call_json(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("technical validation failed: {e}")))?;

    info!(
        "Technical validation: feasible={}, confidence={}, requires_revision={}",
        validation.feasible, validation.confidence_level, validation.requires_revision
    );
    Ok(validation)
}

fn format_plan(plan: &ExecutionPlan) -> String {
    plan.tasks
        .iter()
        .map(|t| format!("- {}: {} ({}h, {})", t.task, t.description, t.hours, t.role))
        .collect::<Vec<_>>()
        .join("\n")
}
