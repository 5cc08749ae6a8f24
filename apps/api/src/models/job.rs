use serde::{Deserialize, Serialize};

/// Job posting information supplied by the caller per generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPost {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub budget_min: Option<f64>,
    #[serde(default)]
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub additional_context: Option<String>,
}

impl JobPost {
    /// Short summary of the job description for template substitution.
    /// Truncated at 200 characters (on a char boundary) with an ellipsis.
    pub fn summary(&self) -> String {
        if self.description.chars().count() > 200 {
            let truncated: String = self.description.chars().take(200).collect();
            format!("{truncated}...")
        } else {
            self.description.clone()
        }
    }
}
