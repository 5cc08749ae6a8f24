//! Placeholder value derivation — builds the variable map a template is
//! rendered with from the job post, the freelancer profile, and the costed
//! execution plan.

use std::collections::{BTreeSet, HashMap};

use crate::models::job::JobPost;
use crate::models::plan::{ExecutionPlan, TaskPlan};
use crate::models::profile::{FreelancerProfile, PortfolioExample};

/// Builds the full variable map for template rendering.
pub fn extract_variables(
    job: &JobPost,
    profile: &FreelancerProfile,
    plan: &ExecutionPlan,
) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    // Job-related variables
    vars.insert(
        "client_name".to_string(),
        job.client_name.clone().unwrap_or_else(|| "there".to_string()),
    );
    vars.insert("job_title".to_string(), job.title.clone());
    vars.insert("project_summary".to_string(), job.summary());

    // Freelancer-related variables
    vars.insert("freelancer_name".to_string(), profile.name.clone());
    vars.insert(
        "experience_years".to_string(),
        profile.experience_years.to_string(),
    );
    vars.insert("hourly_rate".to_string(), format_number(profile.hourly_rate));
    vars.insert(
        "primary_specialization".to_string(),
        profile.primary_specialization().to_string(),
    );
    vars.insert(
        "specializations".to_string(),
        profile.specializations.join(", "),
    );
    vars.insert(
        "relevant_skills".to_string(),
        profile
            .skills
            .iter()
            .take(5)
            .cloned()
            .collect::<Vec<_>>()
            .join(", "),
    );
    vars.insert("technical_skills".to_string(), profile.skills.join(", "));
    vars.insert(
        "achievement_highlight".to_string(),
        profile.achievement_highlight().to_string(),
    );

    // Plan-related variables
    vars.insert("total_hours".to_string(), format_number(plan.total_hours));
    vars.insert("total_cost".to_string(), format_number(plan.total_cost));
    vars.insert(
        "execution_plan_formatted".to_string(),
        format_execution_plan(plan),
    );

    // Derived variables
    vars.insert(
        "estimated_timeline".to_string(),
        estimate_timeline(plan.total_hours).to_string(),
    );
    vars.insert(
        "deliverables_summary".to_string(),
        summarize_deliverables(plan),
    );
    vars.insert(
        "portfolio_highlights".to_string(),
        format_portfolio(&profile.portfolio_examples),
    );
    vars.insert(
        "technology_stack".to_string(),
        infer_technology_stack(plan),
    );
    vars.insert(
        "technical_deliverables".to_string(),
        technical_deliverables(plan),
    );

    vars
}

/// Formats a float without a trailing `.0` for whole numbers.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Top 5 tasks as a numbered list: `1. Task name (8h)`.
pub fn format_execution_plan(plan: &ExecutionPlan) -> String {
    plan.tasks
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, task)| format!("{}. {} ({}h)", i + 1, task.task, format_number(task.hours)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Bucketed project timeline estimate from total hours.
pub fn estimate_timeline(total_hours: f64) -> &'static str {
    if total_hours <= 40.0 {
        "1-2 weeks"
    } else if total_hours <= 80.0 {
        "2-4 weeks"
    } else if total_hours <= 160.0 {
        "1-2 months"
    } else {
        "2-3 months"
    }
}

/// Keyword-derived deliverable summary (max 3, fallback phrase when nothing
/// matches). BTreeSet keeps the output deterministic.
pub fn summarize_deliverables(plan: &ExecutionPlan) -> String {
    let mut deliverables = BTreeSet::new();

    for task in &plan.tasks {
        let name = task.task.to_lowercase();
        if name.contains("analysis") {
            deliverables.insert("detailed analysis");
        }
        if name.contains("model") {
            deliverables.insert("trained models");
        }
        if name.contains("report") {
            deliverables.insert("comprehensive reports");
        }
        if name.contains("dashboard") {
            deliverables.insert("interactive dashboards");
        }
    }

    if deliverables.is_empty() {
        "project deliverables".to_string()
    } else {
        deliverables
            .into_iter()
            .take(3)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// First 3 portfolio examples as `• title: results` bullets.
pub fn format_portfolio(examples: &[PortfolioExample]) -> String {
    if examples.is_empty() {
        return "Multiple successful data science projects with measurable business impact"
            .to_string();
    }

    examples
        .iter()
        .take(3)
        .map(|e| format!("• {}: {}", e.title, e.results))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Infers a technology stack from keywords in task names and descriptions.
pub fn infer_technology_stack(plan: &ExecutionPlan) -> String {
    let mut technologies = BTreeSet::new();

    for task in &plan.tasks {
        let text = format!("{} {}", task.task, task.description).to_lowercase();

        if ["python", "pandas", "numpy"].iter().any(|w| text.contains(w)) {
            technologies.insert("Python");
        }
        if ["machine learning", "ml", "sklearn"].iter().any(|w| text.contains(w)) {
            technologies.insert("Scikit-learn");
        }
        if ["deep learning", "neural", "tensorflow", "pytorch"]
            .iter()
            .any(|w| text.contains(w))
        {
            technologies.insert("TensorFlow/PyTorch");
        }
        if ["visualization", "dashboard", "plot"].iter().any(|w| text.contains(w)) {
            technologies.insert("Matplotlib/Plotly");
        }
        if ["sql", "database", "query"].iter().any(|w| text.contains(w)) {
            technologies.insert("SQL");
        }
    }

    if technologies.is_empty() {
        "Python, Pandas, Scikit-learn".to_string()
    } else {
        technologies.into_iter().collect::<Vec<_>>().join(", ")
    }
}

/// Tasks phrased as build work (`develop`/`build`/`create`/`implement`),
/// max 5, with a generic fallback.
pub fn technical_deliverables(plan: &ExecutionPlan) -> String {
    let deliverables: Vec<String> = plan
        .tasks
        .iter()
        .filter(|t| {
            let name = t.task.to_lowercase();
            ["develop", "build", "create", "implement"]
                .iter()
                .any(|prefix| name.starts_with(prefix))
        })
        .take(5)
        .map(|t| format!("• {}", t.task))
        .collect();

    if deliverables.is_empty() {
        "• Clean, documented code\n• Technical documentation\n• Testing suite".to_string()
    } else {
        deliverables.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::Priority;

    fn task(name: &str, description: &str, hours: f64) -> TaskPlan {
        TaskPlan {
            task: name.to_string(),
            description: description.to_string(),
            role: "Data Scientist".to_string(),
            hours,
            rate: 80.0,
            priority: Priority::Mandatory,
            dependencies: vec![],
        }
    }

    fn sample_plan() -> ExecutionPlan {
        ExecutionPlan::from_tasks(
            vec![
                task("Exploratory data analysis", "Profile the dataset with pandas", 10.0),
                task("Build churn model", "Train sklearn classifiers", 24.0),
                task("Create reporting dashboard", "Plotly dashboard for stakeholders", 12.0),
            ],
            vec![],
        )
    }

    fn sample_profile() -> FreelancerProfile {
        FreelancerProfile {
            name: "Jane Doe".to_string(),
            hourly_rate: 85.0,
            skills: vec![
                "Python".to_string(),
                "ML".to_string(),
                "SQL".to_string(),
                "Pandas".to_string(),
                "Docker".to_string(),
                "Airflow".to_string(),
            ],
            experience_years: 7,
            specializations: vec!["Machine Learning".to_string()],
            portfolio_examples: vec![PortfolioExample {
                title: "Churn pipeline".to_string(),
                description: "ML pipeline".to_string(),
                results: "Reduced churn by 18%".to_string(),
            }],
            achievements: vec!["Top Rated Plus".to_string()],
            languages: vec!["English".to_string()],
        }
    }

    fn sample_job() -> JobPost {
        JobPost {
            title: "Churn prediction".to_string(),
            description: "Predict customer churn".to_string(),
            budget_min: Some(2000.0),
            budget_max: Some(5000.0),
            duration: None,
            skills_required: vec!["Python".to_string()],
            client_name: None,
            additional_context: None,
        }
    }

    #[test]
    fn test_extract_variables_covers_builtin_template_needs() {
        let vars = extract_variables(&sample_job(), &sample_profile(), &sample_plan());
        for key in [
            "client_name",
            "job_title",
            "project_summary",
            "freelancer_name",
            "experience_years",
            "hourly_rate",
            "primary_specialization",
            "relevant_skills",
            "technical_skills",
            "achievement_highlight",
            "total_hours",
            "total_cost",
            "execution_plan_formatted",
            "estimated_timeline",
            "deliverables_summary",
            "portfolio_highlights",
            "technology_stack",
            "technical_deliverables",
        ] {
            assert!(vars.contains_key(key), "missing variable: {key}");
        }
    }

    #[test]
    fn test_missing_client_name_defaults_to_there() {
        let vars = extract_variables(&sample_job(), &sample_profile(), &sample_plan());
        assert_eq!(vars["client_name"], "there");
    }

    #[test]
    fn test_relevant_skills_takes_first_five() {
        let vars = extract_variables(&sample_job(), &sample_profile(), &sample_plan());
        assert_eq!(vars["relevant_skills"], "Python, ML, SQL, Pandas, Docker");
        assert!(vars["technical_skills"].contains("Airflow"));
    }

    #[test]
    fn test_format_number_drops_trailing_zero() {
        assert_eq!(format_number(85.0), "85");
        assert_eq!(format_number(87.5), "87.5");
        assert_eq!(format_number(12.25), "12.25");
    }

    #[test]
    fn test_format_execution_plan_numbers_top_five() {
        let plan = ExecutionPlan::from_tasks(
            (1..=7).map(|i| task(&format!("Task {i}"), "d", 4.0)).collect(),
            vec![],
        );
        let formatted = format_execution_plan(&plan);
        assert!(formatted.starts_with("1. Task 1 (4h)"));
        assert_eq!(formatted.lines().count(), 5);
    }

    #[test]
    fn test_estimate_timeline_buckets() {
        assert_eq!(estimate_timeline(40.0), "1-2 weeks");
        assert_eq!(estimate_timeline(41.0), "2-4 weeks");
        assert_eq!(estimate_timeline(120.0), "1-2 months");
        assert_eq!(estimate_timeline(200.0), "2-3 months");
    }

    #[test]
    fn test_summarize_deliverables_from_task_keywords() {
        let summary = summarize_deliverables(&sample_plan());
        assert!(summary.contains("detailed analysis"));
        assert!(summary.contains("trained models"));
        assert!(summary.contains("interactive dashboards"));
    }

    #[test]
    fn test_summarize_deliverables_fallback() {
        let plan = ExecutionPlan::from_tasks(vec![task("Kickoff call", "d", 1.0)], vec![]);
        assert_eq!(summarize_deliverables(&plan), "project deliverables");
    }

    #[test]
    fn test_format_portfolio_bullets_and_fallback() {
        let profile = sample_profile();
        let formatted = format_portfolio(&profile.portfolio_examples);
        assert_eq!(formatted, "• Churn pipeline: Reduced churn by 18%");
        assert!(format_portfolio(&[]).contains("Multiple successful"));
    }

    #[test]
    fn test_infer_technology_stack_from_task_text() {
        let stack = infer_technology_stack(&sample_plan());
        assert!(stack.contains("Python"));
        assert!(stack.contains("Scikit-learn"));
        assert!(stack.contains("Matplotlib/Plotly"));
    }

    #[test]
    fn test_technical_deliverables_filters_build_verbs() {
        let deliverables = technical_deliverables(&sample_plan());
        assert!(deliverables.contains("• Build churn model"));
        assert!(deliverables.contains("• Create reporting dashboard"));
        assert!(!deliverables.contains("Exploratory"));
    }
}
