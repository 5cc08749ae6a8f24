//! File storage — profiles, templates, and saved proposal outputs on disk.
//!
//! Layout under the configured data directory:
//!   profiles/<name>.json
//!   templates/<name>.json
//!   outputs/<timestamp>_<job-title>/{proposal.txt, execution_plan.csv, metadata.json}

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::models::plan::ExecutionPlan;
use crate::models::profile::FreelancerProfile;
use crate::templates::{builtin, ProposalTemplate};

/// Handle to the on-disk data layout. Cheap to clone; carried in `AppState`.
#[derive(Debug, Clone)]
pub struct FileStore {
    profiles_dir: PathBuf,
    templates_dir: PathBuf,
    outputs_dir: PathBuf,
}

impl FileStore {
    /// Opens the store, creating the directory layout if needed.
    pub fn new(base_dir: &Path) -> std::io::Result<Self> {
        let store = FileStore {
            profiles_dir: base_dir.join("profiles"),
            templates_dir: base_dir.join("templates"),
            outputs_dir: base_dir.join("outputs"),
        };
        for dir in [&store.profiles_dir, &store.templates_dir, &store.outputs_dir] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(store)
    }

    // ── Profiles ────────────────────────────────────────────────────────────

    /// Lists available profile names (file stems, sorted).
    pub async fn list_profiles(&self) -> Result<Vec<String>, AppError> {
        list_json_stems(&self.profiles_dir).await
    }

    /// Loads a profile, failing fast on malformed JSON with an error naming
    /// the profile and the parse failure.
    pub async fn load_profile(&self, name: &str) -> Result<FreelancerProfile, AppError> {
        let path = self.profiles_dir.join(format!("{name}.json"));
        let raw = read_named(&path, "profile", name).await?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::Validation(format!("malformed profile '{name}': {e}")))
    }

    pub async fn save_profile(
        &self,
        name: &str,
        profile: &FreelancerProfile,
    ) -> Result<(), AppError> {
        let path = self.profiles_dir.join(format!("{name}.json"));
        let pretty = serde_json::to_string_pretty(profile)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing profile: {e}")))?;
        tokio::fs::write(&path, pretty).await?;
        info!("Profile saved: {name}");
        Ok(())
    }

    // ── Templates ───────────────────────────────────────────────────────────

    pub async fn list_templates(&self) -> Result<Vec<String>, AppError> {
        list_json_stems(&self.templates_dir).await
    }

    pub async fn load_template(&self, name: &str) -> Result<ProposalTemplate, AppError> {
        let path = self.templates_dir.join(format!("{name}.json"));
        let raw = read_named(&path, "template", name).await?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::Validation(format!("malformed template '{name}': {e}")))
    }

    pub async fn save_template(&self, template: &ProposalTemplate) -> Result<(), AppError> {
        let path = self.templates_dir.join(format!("{}.json", template.name));
        let pretty = serde_json::to_string_pretty(template)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing template: {e}")))?;
        tokio::fs::write(&path, pretty).await?;
        info!("Template saved: {}", template.name);
        Ok(())
    }

    /// Seeds the built-in templates, skipping any name already on disk.
    pub async fn ensure_builtin_templates(&self) -> Result<(), AppError> {
        for template in builtin::all() {
            let path = self.templates_dir.join(format!("{}.json", template.name));
            if !path.exists() {
                self.save_template(&template).await?;
            }
        }
        Ok(())
    }

    // ── Proposal outputs ────────────────────────────────────────────────────

    /// Saves a generated proposal: text, the execution plan as CSV, and a
    /// metadata JSON, under a timestamped directory. Returns that directory.
    pub async fn save_proposal_output(
        &self,
        proposal_text: &str,
        plan: &ExecutionPlan,
        job_title: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<PathBuf, AppError> {
        let dir_name = format!(
            "{}_{}",
            generated_at.format("%Y%m%d_%H%M%S"),
            sanitize_title(job_title)
        );
        let proposal_dir = self.outputs_dir.join(dir_name);
        tokio::fs::create_dir_all(&proposal_dir).await?;

        tokio::fs::write(proposal_dir.join("proposal.txt"), proposal_text).await?;
        tokio::fs::write(proposal_dir.join("execution_plan.csv"), plan_to_csv(plan)?).await?;

        let metadata = json!({
            "job_title": job_title,
            "generated_at": generated_at.to_rfc3339(),
            "total_cost": plan.total_cost,
            "total_hours": plan.total_hours,
            "mandatory_cost": plan.mandatory_cost,
            "optional_cost": plan.optional_cost,
        });
        tokio::fs::write(
            proposal_dir.join("metadata.json"),
            serde_json::to_string_pretty(&metadata)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing metadata: {e}")))?,
        )
        .await?;

        info!("Proposal saved to {}", proposal_dir.display());
        Ok(proposal_dir)
    }
}

async fn read_named(path: &Path, kind: &str, name: &str) -> Result<String, AppError> {
    match tokio::fs::read_to_string(path).await {
        Ok(raw) => Ok(raw),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::NotFound(format!("{kind} '{name}' not found")))
        }
        Err(e) => Err(AppError::Storage(e)),
    }
}

async fn list_json_stems(dir: &Path) -> Result<Vec<String>, AppError> {
    let mut stems = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                stems.push(stem.to_string());
            }
        }
    }
    stems.sort();
    Ok(stems)
}

/// Sanitizes a job title for use as a directory name: alphanumerics, spaces,
/// dashes, and underscores only; spaces become underscores; max 50 chars.
fn sanitize_title(title: &str) -> String {
    let safe: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    safe.trim()
        .replace(' ', "_")
        .chars()
        .take(50)
        .collect()
}

/// Renders the execution plan as CSV (Task, Description, Role, Hours, Rate, Priority).
fn plan_to_csv(plan: &ExecutionPlan) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Task", "Description", "Role", "Hours", "Rate", "Priority"])
        .map_err(|e| AppError::Internal(anyhow::anyhow!("writing CSV header: {e}")))?;

    for task in &plan.tasks {
        let priority = serde_json::to_value(task.priority)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        writer
            .write_record([
                task.task.as_str(),
                task.description.as_str(),
                task.role.as_str(),
                &task.hours.to_string(),
                &task.rate.to_string(),
                &priority,
            ])
            .map_err(|e| AppError::Internal(anyhow::anyhow!("writing CSV row: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("flushing CSV: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::plan::{Priority, TaskPlan};
    use crate::models::profile::PortfolioExample;

    fn sample_profile() -> FreelancerProfile {
        FreelancerProfile {
            name: "Jane Doe".to_string(),
            hourly_rate: 85.0,
            skills: vec!["Python".to_string()],
            experience_years: 7,
            specializations: vec!["ML".to_string()],
            portfolio_examples: vec![PortfolioExample {
                title: "Churn pipeline".to_string(),
                description: "d".to_string(),
                results: "r".to_string(),
            }],
            achievements: vec![],
            languages: vec!["English".to_string()],
        }
    }

    fn sample_plan() -> ExecutionPlan {
        ExecutionPlan::from_tasks(
            vec![TaskPlan {
                task: "EDA".to_string(),
                description: "Explore, with \"quotes\" and, commas".to_string(),
                role: "Data Scientist".to_string(),
                hours: 8.0,
                rate: 85.0,
                priority: Priority::Mandatory,
                dependencies: vec![],
            }],
            vec![],
        )
    }

    #[test]
    fn test_sanitize_title_strips_and_truncates() {
        assert_eq!(sanitize_title("Build ML/AI pipeline!"), "Build_MLAI_pipeline");
        assert_eq!(sanitize_title(&"x".repeat(80)).len(), 50);
    }

    #[test]
    fn test_plan_to_csv_quotes_and_priority_label() {
        let csv_bytes = plan_to_csv(&sample_plan()).unwrap();
        let text = String::from_utf8(csv_bytes).unwrap();
        assert!(text.starts_with("Task,Description,Role,Hours,Rate,Priority"));
        assert!(text.contains("mandatory"));
        assert!(text.contains("\"Explore, with \"\"quotes\"\" and, commas\""));
    }

    #[tokio::test]
    async fn test_profile_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.save_profile("jane", &sample_profile()).await.unwrap();
        let loaded = store.load_profile("jane").await.unwrap();
        assert_eq!(loaded.name, "Jane Doe");

        let listed = store.list_profiles().await.unwrap();
        assert_eq!(listed, vec!["jane"]);
    }

    #[tokio::test]
    async fn test_load_missing_profile_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        let err = store.load_profile("ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_load_malformed_profile_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        tokio::fs::write(dir.path().join("profiles/bad.json"), "{ not json")
            .await
            .unwrap();
        let err = store.load_profile("bad").await.unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("malformed profile 'bad'")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_ensure_builtin_templates_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.ensure_builtin_templates().await.unwrap();
        let listed = store.list_templates().await.unwrap();
        assert_eq!(listed, vec!["creative", "professional", "technical"]);

        // Seeding again must not overwrite a user-edited template
        let mut edited = store.load_template("creative").await.unwrap();
        edited.variables.push("custom_var".to_string());
        store.save_template(&edited).await.unwrap();
        store.ensure_builtin_templates().await.unwrap();
        let reloaded = store.load_template("creative").await.unwrap();
        assert!(reloaded.variables.contains(&"custom_var".to_string()));
    }

    #[tokio::test]
    async fn test_save_proposal_output_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        let out_dir = store
            .save_proposal_output("Dear client...", &sample_plan(), "Churn: phase 1", Utc::now())
            .await
            .unwrap();

        assert!(out_dir.join("proposal.txt").exists());
        assert!(out_dir.join("execution_plan.csv").exists());
        assert!(out_dir.join("metadata.json").exists());

        let metadata: serde_json::Value = serde_json::from_str(
            &tokio::fs::read_to_string(out_dir.join("metadata.json"))
                .await
                .unwrap(),
        )
        .unwrap();
        assert_eq!(metadata["job_title"], "Churn: phase 1");
        assert_eq!(metadata["total_cost"], 680.0);
    }
}
