//! Costing agent — validates a plan against the budget and asks for a
//! translator revision when the numbers do not work.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{COSTING_PROMPT_TEMPLATE, COSTING_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::models::plan::ExecutionPlan;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub mandatory: f64,
    pub optional: f64,
    #[serde(default)]
    pub recommended_cuts: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostAnalysis {
    pub within_budget: bool,
    /// Fraction of the max budget the plan consumes (model-reported).
    pub budget_utilization: f64,
    pub risk_level: String,
    #[serde(default)]
    pub optimizations: Vec<String>,
    pub requires_revision: bool,
    #[serde(default)]
    pub feedback_for_translator: Option<String>,
    pub cost_breakdown: CostBreakdown,
}

impl CostAnalysis {
    /// Recommended cuts as a fraction of the plan's total cost. Drives the
    /// budget-reduction warning in the orchestrator.
    pub fn budget_reduction(&self, plan: &ExecutionPlan) -> f64 {
        if self.cost_breakdown.recommended_cuts > 0.0 && plan.total_cost > 0.0 {
            self.cost_breakdown.recommended_cuts / plan.total_cost
        } else {
            0.0
        }
    }
}

pub async fn validate_costs(
    llm: &LlmClient,
    plan: &ExecutionPlan,
    max_budget: Option<f64>,
    error_margin: f64,
) -> Result<CostAnalysis, AppError> {
    let max_budget_text = max_budget
        .map(|b| format!("${b}"))
        .unwrap_or_else(|| "Not specified".to_string());

    let prompt = COSTING_PROMPT_TEMPLATE
        .replace("{total_cost}", &format!("{:.2}", plan.total_cost))
        .replace("{mandatory_cost}", &format!("{:.2}", plan.mandatory_cost))
        .replace("{optional_cost}", &format!("{:.2}", plan.optional_cost))
        .replace("{total_hours}", &plan.total_hours.to_string())
        .replace("{max_budget}", &max_budget_text)
        .replace("{error_margin_pct}", &format!("{}", error_margin * 100.0))
        .replace("{task_lines}", &format_tasks(plan));

    let system = format!("{COSTING_SYSTEM} {JSON_ONLY_INSTRUCTION}");
    let analysis: CostAnalysis = llm
        .call_json(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("cost analysis failed: {e}")))?;

    info!(
        "Cost analysis: within_budget={}, risk={}, requires_revision={}",
        analysis.within_budget, analysis.risk_level, analysis.requires_revision
    );
    Ok(analysis)
}

fn format_tasks(plan: &ExecutionPlan) -> String {
    plan.tasks
        .iter()
        .map(|t| {
            format!(
                "- {} ({:?}): {}h @ ${} = ${:.2}",
                t.task, t.priority, t.hours, t.rate, t.cost()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
