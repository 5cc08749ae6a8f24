//! Freelancer profile — the static record a proposal is generated from.
//!
//! Profiles are plain JSON documents on disk. Parsing is strict: a missing
//! required field fails loudly (naming the field) instead of defaulting.

use serde::{Deserialize, Serialize};

/// A single portfolio case study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioExample {
    pub title: String,
    pub description: String,
    pub results: String,
}

/// Freelancer profile configuration.
///
/// All list fields are order-sensitive: the first specialization is the
/// primary one, the first achievement the headline one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreelancerProfile {
    pub name: String,
    pub hourly_rate: f64,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub specializations: Vec<String>,
    pub portfolio_examples: Vec<PortfolioExample>,
    pub achievements: Vec<String>,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

fn default_languages() -> Vec<String> {
    vec!["English".to_string()]
}

impl FreelancerProfile {
    /// The primary specialization, falling back to a generic label.
    pub fn primary_specialization(&self) -> &str {
        self.specializations
            .first()
            .map(String::as_str)
            .unwrap_or("data science")
    }

    /// The headline achievement, falling back to a generic phrase.
    pub fn achievement_highlight(&self) -> &str {
        self.achievements
            .first()
            .map(String::as_str)
            .unwrap_or("multiple successful projects")
    }
}
