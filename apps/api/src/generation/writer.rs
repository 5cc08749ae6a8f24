//! Commercial writer — produces the client-facing proposal text. This is the
//! one plain-text agent; everything else speaks JSON.

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{budget_range, WRITER_PROMPT_TEMPLATE, WRITER_SYSTEM};
use crate::llm_client::prompts::HONESTY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::models::job::JobPost;
use crate::models::plan::ExecutionPlan;
use crate::models::profile::FreelancerProfile;
use crate::templates::Tone;

pub async fn write_proposal(
    llm: &LlmClient,
    job: &JobPost,
    plan: &ExecutionPlan,
    profile: &FreelancerProfile,
    tone: Tone,
    reviewer_feedback: Option<&str>,
) -> Result<String, AppError> {
    let feedback_block = match reviewer_feedback {
        Some(text) => format!("Reviewer Feedback to Address: {text}"),
        None => String::new(),
    };

    let prompt = WRITER_PROMPT_TEMPLATE
        .replace("{job_title}", &job.title)
        .replace("{job_description}", &job.description)
        .replace("{budget_range}", &budget_range(job.budget_min, job.budget_max))
        .replace(
            "{client_name}",
            job.client_name.as_deref().unwrap_or("Not specified"),
        )
        .replace("{total_cost}", &format!("{:.2}", plan.total_cost))
        .replace("{total_hours}", &plan.total_hours.to_string())
        .replace("{key_tasks}", &format_key_tasks(plan))
        .replace("{freelancer_name}", &profile.name)
        .replace("{experience_years}", &profile.experience_years.to_string())
        .replace("{specializations}", &profile.specializations.join(", "))
        .replace(
            "{achievements}",
            &profile
                .achievements
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join("; "),
        )
        .replace("{tone}", tone.as_str())
        .replace("{feedback_block}", &feedback_block);

    let system = format!("{WRITER_SYSTEM} {HONESTY_INSTRUCTION}");
    let text = llm
        .call(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("proposal writing failed: {e}")))?;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Llm("writer returned an empty proposal".to_string()));
    }

    info!("Proposal drafted: {} chars", text.len());
    Ok(text)
}

/// Top 5 tasks, numbered, for the writer prompt.
fn format_key_tasks(plan: &ExecutionPlan) -> String {
    plan.tasks
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, t)| format!("{}. {}: {}", i + 1, t.task, t.description))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::{Priority, TaskPlan};

    fn task(name: &str) -> TaskPlan {
        TaskPlan {
            task: name.to_string(),
            description: format!("{name} work"),
            role: "Data Scientist".to_string(),
            hours: 4.0,
            rate: 50.0,
            priority: Priority::Mandatory,
            dependencies: vec![],
        }
    }

    #[test]
    fn test_key_tasks_capped_at_five() {
        let plan = ExecutionPlan::from_tasks(
            (0..8).map(|i| task(&format!("T{i}"))).collect(),
            vec![],
        );
        let text = format_key_tasks(&plan);
        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("1. T0: T0 work"));
        assert!(text.contains("5. T4"));
    }
}
