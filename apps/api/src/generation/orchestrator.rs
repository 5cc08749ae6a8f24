//! Orchestrator — drives the agent pipeline from job post to finished
//! proposal, with bounded revision loops between agents.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::generation::{costing, reviewer, technical, translator, writer};
use crate::llm_client::LlmClient;
use crate::models::history::ProposalOutput;
use crate::models::job::JobPost;
use crate::models::plan::ExecutionPlan;
use crate::models::profile::FreelancerProfile;
use crate::templates::ProposalTemplate;

/// Pipeline states, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    Initializing,
    TranslatingRequirements,
    ValidatingCosts,
    ValidatingTechnical,
    WritingProposal,
    ReviewingProposal,
    Completed,
    Failed,
}

impl ProcessState {
    /// Progress fraction for status reporting.
    pub fn progress(&self) -> f64 {
        match self {
            ProcessState::Initializing => 0.0,
            ProcessState::TranslatingRequirements => 0.2,
            ProcessState::ValidatingCosts => 0.4,
            ProcessState::ValidatingTechnical => 0.6,
            ProcessState::WritingProposal => 0.8,
            ProcessState::ReviewingProposal => 0.9,
            ProcessState::Completed => 1.0,
            ProcessState::Failed => 0.0,
        }
    }
}

pub struct Orchestrator {
    llm: LlmClient,
    max_revisions: u32,
    budget_warning_threshold: f64,
    state: ProcessState,
    revision_count: u32,
}

impl Orchestrator {
    pub fn new(llm: LlmClient, config: &Config) -> Self {
        Self {
            llm,
            max_revisions: config.max_revision_cycles,
            budget_warning_threshold: config.budget_reduction_warning_threshold,
            state: ProcessState::Initializing,
            revision_count: 0,
        }
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn revision_count(&self) -> u32 {
        self.revision_count
    }

    fn set_state(&mut self, state: ProcessState) {
        self.state = state;
        info!(
            "Pipeline state: {:?} ({:.0}%)",
            state,
            state.progress() * 100.0
        );
    }

    /// Full pipeline: translate, validate costs, validate feasibility,
    /// write, review. Revision cycles are shared across all phases and
    /// bounded by `max_revision_cycles`.
    pub async fn generate(
        &mut self,
        job: &JobPost,
        profile: &FreelancerProfile,
        template: &ProposalTemplate,
        max_budget: Option<f64>,
        error_margin: f64,
    ) -> Result<ProposalOutput, AppError> {
        info!("Starting proposal generation for job: {}", job.title);

        let result = self
            .run_pipeline(job, profile, template, max_budget, error_margin)
            .await;

        match &result {
            Ok(_) => {
                self.set_state(ProcessState::Completed);
                info!("Proposal generation completed successfully");
            }
            Err(e) => {
                self.set_state(ProcessState::Failed);
                error!("Proposal generation failed: {e}");
            }
        }
        result
    }

    async fn run_pipeline(
        &mut self,
        job: &JobPost,
        profile: &FreelancerProfile,
        template: &ProposalTemplate,
        max_budget: Option<f64>,
        error_margin: f64,
    ) -> Result<ProposalOutput, AppError> {
        self.set_state(ProcessState::TranslatingRequirements);
        let mut plan = translator::create_execution_plan(&self.llm, job, profile, None).await?;

        self.set_state(ProcessState::ValidatingCosts);
        plan = self
            .cost_validation_loop(plan, job, profile, max_budget, error_margin)
            .await?;

        self.set_state(ProcessState::ValidatingTechnical);
        let validation =
            technical::validate_feasibility(&self.llm, &plan, profile, job).await?;
        if validation.requires_revision && self.revision_count < self.max_revisions {
            self.revision_count += 1;
            info!(
                "Technical validation requires revision (attempt {})",
                self.revision_count
            );
            plan = translator::create_execution_plan(
                &self.llm,
                job,
                profile,
                validation.feedback_for_translator.as_deref(),
            )
            .await?;
            // Revised plans go back through cost validation
            plan = self
                .cost_validation_loop(plan, job, profile, max_budget, error_margin)
                .await?;
        }

        self.set_state(ProcessState::WritingProposal);
        let mut proposal_text =
            writer::write_proposal(&self.llm, job, &plan, profile, template.tone, None).await?;

        self.set_state(ProcessState::ReviewingProposal);
        let review = loop {
            let review =
                reviewer::review_proposal(&self.llm, job, &proposal_text, &plan).await?;
            if !review.requires_revision || self.revision_count >= self.max_revisions {
                break review;
            }
            self.revision_count += 1;
            info!(
                "Proposal review requires revision (attempt {})",
                self.revision_count
            );
            proposal_text = writer::write_proposal(
                &self.llm,
                job,
                &plan,
                profile,
                template.tone,
                review.feedback_for_writer.as_deref(),
            )
            .await?;
        };

        let recommendations = self.build_recommendations(&plan, max_budget, &review);

        Ok(ProposalOutput {
            proposal_text,
            execution_plan: plan,
            reviewer_feedback: review.improvement_suggestions.clone(),
            quality_score: review.overall_score / 10.0,
            estimated_win_probability: review.estimated_win_probability / 100.0,
            recommendations,
        })
    }

    async fn cost_validation_loop(
        &mut self,
        mut plan: ExecutionPlan,
        job: &JobPost,
        profile: &FreelancerProfile,
        max_budget: Option<f64>,
        error_margin: f64,
    ) -> Result<ExecutionPlan, AppError> {
        loop {
            let analysis =
                costing::validate_costs(&self.llm, &plan, max_budget, error_margin).await?;

            if !analysis.within_budget {
                let reduction = analysis.budget_reduction(&plan);
                if reduction > self.budget_warning_threshold {
                    warn!(
                        "Budget reduction of {:.1}% exceeds threshold",
                        reduction * 100.0
                    );
                }
            }

            if !analysis.requires_revision || self.revision_count >= self.max_revisions {
                return Ok(plan);
            }

            self.revision_count += 1;
            info!(
                "Cost validation requires revision (attempt {})",
                self.revision_count
            );
            plan = translator::create_execution_plan(
                &self.llm,
                job,
                profile,
                analysis.feedback_for_translator.as_deref(),
            )
            .await?;
        }
    }

    /// Express pipeline: translate and write only, with fixed quality
    /// metrics. For quick turnarounds where review overhead is not worth it.
    pub async fn generate_express(
        &mut self,
        job: &JobPost,
        profile: &FreelancerProfile,
        template: &ProposalTemplate,
    ) -> Result<ProposalOutput, AppError> {
        info!("Starting express proposal generation for: {}", job.title);

        self.set_state(ProcessState::TranslatingRequirements);
        let plan = translator::create_execution_plan(&self.llm, job, profile, None).await?;

        self.set_state(ProcessState::WritingProposal);
        let proposal_text =
            writer::write_proposal(&self.llm, job, &plan, profile, template.tone, None).await?;

        self.set_state(ProcessState::Completed);
        Ok(ProposalOutput {
            proposal_text,
            execution_plan: plan,
            reviewer_feedback: vec![
                "Express mode - no detailed review performed".to_string(),
            ],
            quality_score: 0.75,
            estimated_win_probability: 0.6,
            recommendations: vec![
                "Express mode used - consider full validation for important projects"
                    .to_string(),
                "Review proposal manually before submission".to_string(),
            ],
        })
    }

    fn build_recommendations(
        &self,
        plan: &ExecutionPlan,
        max_budget: Option<f64>,
        review: &reviewer::ProposalReview,
    ) -> Vec<String> {
        let mut recommendations = review.improvement_suggestions.clone();

        if let Some(budget) = max_budget {
            if budget > 0.0 {
                let utilization = plan.total_cost / budget;
                if utilization < 0.7 {
                    recommendations.push(
                        "Consider adding optional deliverables to maximize budget utilization"
                            .to_string(),
                    );
                } else if utilization > 0.95 {
                    recommendations.push(
                        "Budget utilization is very high - consider adding contingency buffer"
                            .to_string(),
                    );
                }
            }
        }

        if self.revision_count > 1 {
            recommendations.push(format!(
                "Proposal went through {} revisions - consider refining initial requirements gathering",
                self.revision_count
            ));
        }

        if plan.tasks.len() > 10 {
            recommendations.push(
                "Consider grouping related tasks into phases for better client communication"
                    .to_string(),
            );
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{ChatBackend, LlmError};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Backend that plays back a fixed script of responses, one per call.
    struct ScriptedBackend {
        responses: Mutex<VecDeque<String>>,
    }

    impl ScriptedBackend {
        fn new(responses: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            })
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(LlmError::EmptyContent)
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    const PLAN_JSON: &str = r#"{
        "tasks": [
            {"task": "EDA", "description": "Explore data", "role": "Data Scientist",
             "hours": 10.0, "priority": "mandatory"},
            {"task": "Model", "description": "Train model", "role": "ML Engineer",
             "hours": 20.0, "priority": "mandatory"}
        ],
        "notes": []
    }"#;

    const COSTING_OK: &str = r#"{
        "within_budget": true, "budget_utilization": 0.8, "risk_level": "low",
        "optimizations": [], "requires_revision": false,
        "cost_breakdown": {"mandatory": 2400.0, "optional": 0.0, "recommended_cuts": 0.0}
    }"#;

    const COSTING_REVISE: &str = r#"{
        "within_budget": false, "budget_utilization": 1.3, "risk_level": "high",
        "optimizations": [], "requires_revision": true,
        "feedback_for_translator": "reduce scope",
        "cost_breakdown": {"mandatory": 2400.0, "optional": 0.0, "recommended_cuts": 800.0}
    }"#;

    const TECHNICAL_OK: &str = r#"{
        "feasible": true, "confidence_level": "high", "requires_revision": false
    }"#;

    const PROPOSAL_TEXT: &str = "Dear client, here is my plan.";

    const REVIEW_OK: &str = r#"{
        "overall_score": 8.0, "would_shortlist": true,
        "improvement_suggestions": ["Mention timeline explicitly"],
        "estimated_win_probability": 70, "requires_revision": false
    }"#;

    fn config() -> Config {
        Config::for_tests()
    }

    fn profile() -> FreelancerProfile {
        serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "hourly_rate": 80.0,
            "skills": ["Python"],
            "experience_years": 6,
            "specializations": ["machine learning"],
            "portfolio_examples": [],
            "achievements": ["Shipped a fraud model"]
        }))
        .unwrap()
    }

    fn job() -> JobPost {
        serde_json::from_str(r#"{"title": "Churn model", "description": "Predict churn"}"#)
            .unwrap()
    }

    fn template() -> ProposalTemplate {
        crate::templates::builtin::professional()
    }

    #[tokio::test]
    async fn test_full_pipeline_no_revisions() {
        let backend = ScriptedBackend::new(&[
            PLAN_JSON,
            COSTING_OK,
            TECHNICAL_OK,
            PROPOSAL_TEXT,
            REVIEW_OK,
        ]);
        let mut orchestrator = Orchestrator::new(LlmClient::with_backend(backend), &config());

        let output = orchestrator
            .generate(&job(), &profile(), &template(), Some(3000.0), 0.1)
            .await
            .unwrap();

        assert_eq!(orchestrator.state(), ProcessState::Completed);
        assert_eq!(orchestrator.revision_count(), 0);
        assert_eq!(output.proposal_text, PROPOSAL_TEXT);
        assert!((output.quality_score - 0.8).abs() < f64::EPSILON);
        assert!((output.estimated_win_probability - 0.7).abs() < f64::EPSILON);
        assert!(output
            .recommendations
            .contains(&"Mention timeline explicitly".to_string()));
    }

    #[tokio::test]
    async fn test_cost_revision_loop_is_bounded() {
        // Costing always demands revision; pipeline must stop at max_revision_cycles
        let backend = ScriptedBackend::new(&[
            PLAN_JSON,
            COSTING_REVISE,
            PLAN_JSON,
            COSTING_REVISE,
            PLAN_JSON,
            COSTING_REVISE,
            PLAN_JSON,
            COSTING_REVISE,
            TECHNICAL_OK,
            PROPOSAL_TEXT,
            REVIEW_OK,
        ]);
        let mut orchestrator = Orchestrator::new(LlmClient::with_backend(backend), &config());

        let output = orchestrator
            .generate(&job(), &profile(), &template(), Some(1000.0), 0.1)
            .await
            .unwrap();

        assert_eq!(orchestrator.revision_count(), 3);
        // >1 revision adds the requirements-gathering recommendation
        assert!(output
            .recommendations
            .iter()
            .any(|r| r.contains("3 revisions")));
    }

    #[tokio::test]
    async fn test_express_pipeline_fixed_metrics() {
        let backend = ScriptedBackend::new(&[PLAN_JSON, PROPOSAL_TEXT]);
        let mut orchestrator = Orchestrator::new(LlmClient::with_backend(backend), &config());

        let output = orchestrator
            .generate_express(&job(), &profile(), &template())
            .await
            .unwrap();

        assert_eq!(output.quality_score, 0.75);
        assert_eq!(output.estimated_win_probability, 0.6);
        assert_eq!(output.execution_plan.tasks.len(), 2);
        assert_eq!(orchestrator.state(), ProcessState::Completed);
    }

    #[tokio::test]
    async fn test_pipeline_failure_sets_failed_state() {
        // Script runs dry immediately
        let backend = ScriptedBackend::new(&[]);
        let mut orchestrator = Orchestrator::new(LlmClient::with_backend(backend), &config());

        let result = orchestrator
            .generate(&job(), &profile(), &template(), None, 0.1)
            .await;
        assert!(result.is_err());
        assert_eq!(orchestrator.state(), ProcessState::Failed);
    }

    #[test]
    fn test_progress_fractions() {
        assert_eq!(ProcessState::Initializing.progress(), 0.0);
        assert_eq!(ProcessState::ValidatingCosts.progress(), 0.4);
        assert_eq!(ProcessState::Completed.progress(), 1.0);
        assert_eq!(ProcessState::Failed.progress(), 0.0);
    }

    #[test]
    fn test_budget_utilization_recommendations() {
        let llm = LlmClient::with_backend(ScriptedBackend::new(&[]));
        let orchestrator = Orchestrator::new(llm, &config());

        let plan: ExecutionPlan = {
            let raw: serde_json::Value = serde_json::from_str(PLAN_JSON).unwrap();
            let tasks = raw["tasks"]
                .as_array()
                .unwrap()
                .iter()
                .map(|t| crate::models::plan::TaskPlan {
                    task: t["task"].as_str().unwrap().to_string(),
                    description: t["description"].as_str().unwrap().to_string(),
                    role: t["role"].as_str().unwrap().to_string(),
                    hours: t["hours"].as_f64().unwrap(),
                    rate: 80.0,
                    priority: crate::models::plan::Priority::Mandatory,
                    dependencies: vec![],
                })
                .collect();
            ExecutionPlan::from_tasks(tasks, vec![])
        };
        let review: reviewer::ProposalReview = serde_json::from_str(REVIEW_OK).unwrap();

        // total_cost = 2400; budget 10000 → utilization 0.24 < 0.7
        let recs = orchestrator.build_recommendations(&plan, Some(10_000.0), &review);
        assert!(recs.iter().any(|r| r.contains("optional deliverables")));

        // budget 2450 → utilization ~0.98 > 0.95
        let recs = orchestrator.build_recommendations(&plan, Some(2450.0), &review);
        assert!(recs.iter().any(|r| r.contains("contingency buffer")));
    }
}
