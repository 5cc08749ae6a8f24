//! Business translator — turns a job post plus profile into a costed
//! `ExecutionPlan`. The LLM proposes tasks and hours; rates and totals are
//! always computed locally from the profile's hourly rate.

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{budget_range, TRANSLATOR_PROMPT_TEMPLATE, TRANSLATOR_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::models::job::JobPost;
use crate::models::plan::{ExecutionPlan, Priority, TaskPlan};
use crate::models::profile::FreelancerProfile;

/// Raw task shape as returned by the model. No rate field: the model does
/// not get to set pricing.
#[derive(Debug, Deserialize)]
struct RawTask {
    task: String,
    description: String,
    role: String,
    hours: f64,
    priority: Priority,
    #[serde(default)]
    dependencies: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlan {
    tasks: Vec<RawTask>,
    #[serde(default)]
    notes: Vec<String>,
}

/// Creates an execution plan from the job post. `feedback` carries costing
/// or technical feedback when a revision was requested.
pub async fn create_execution_plan(
    llm: &LlmClient,
    job: &JobPost,
    profile: &FreelancerProfile,
    feedback: Option<&str>,
) -> Result<ExecutionPlan, AppError> {
    let feedback_block = match feedback {
        Some(text) => format!("Previous Feedback: {text}"),
        None => String::new(),
    };

    let prompt = TRANSLATOR_PROMPT_TEMPLATE
        .replace("{job_title}", &job.title)
        .replace("{job_description}", &job.description)
        .replace("{budget_range}", &budget_range(job.budget_min, job.budget_max))
        .replace("{skills_required}", &job.skills_required.join(", "))
        .replace("{hourly_rate}", &profile.hourly_rate.to_string())
        .replace("{skills}", &profile.skills.join(", "))
        .replace("{experience_years}", &profile.experience_years.to_string())
        .replace("{specializations}", &profile.specializations.join(", "))
        .replace("{feedback_block}", &feedback_block);

    let system = format!("{TRANSLATOR_SYSTEM} {JSON_ONLY_INSTRUCTION}");
    let raw: RawPlan = llm
        .call_json(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("execution plan generation failed: {e}")))?;

    if raw.tasks.is_empty() {
        return Err(AppError::Llm(
            "translator returned an empty task list".to_string(),
        ));
    }

    let tasks: Vec<TaskPlan> = raw
        .tasks
        .into_iter()
        .map(|t| TaskPlan {
            task: t.task,
            description: t.description,
            role: t.role,
            hours: t.hours,
            rate: profile.hourly_rate,
            priority: t.priority,
            dependencies: t.dependencies,
        })
        .collect();

    let plan = ExecutionPlan::from_tasks(tasks, raw.notes);
    info!(
        "Execution plan created: {} tasks, {} hours, ${:.2}",
        plan.tasks.len(),
        plan.total_hours,
        plan.total_cost
    );
    Ok(plan)
}
