use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Which LLM provider backs proposal generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Claude,
}

impl LlmProvider {
    fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "claude" | "anthropic" => Ok(LlmProvider::Claude),
            other => bail!("Unknown LLM_PROVIDER '{other}' (expected 'openai' or 'claude')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if the API key for the selected provider is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_provider: LlmProvider,
    pub api_key: String,
    pub openai_model: String,
    pub claude_model: String,
    pub database_url: String,
    pub data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Shared revision budget across costing, technical, and review loops.
    pub max_revision_cycles: u32,
    pub default_error_margin: f64,
    pub budget_reduction_warning_threshold: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_provider = LlmProvider::parse(
            &std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
        )?;

        let api_key = match llm_provider {
            LlmProvider::OpenAi => require_env("OPENAI_API_KEY")?,
            LlmProvider::Claude => require_env("ANTHROPIC_API_KEY")?,
        };

        Ok(Config {
            llm_provider,
            api_key,
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
            claude_model: std::env::var("CLAUDE_MODEL")
                .unwrap_or_else(|_| "claude-3-sonnet-20240229".to_string()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/history.db".to_string()),
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_revision_cycles: parse_or("MAX_REVISION_CYCLES", 3)?,
            default_error_margin: parse_or("DEFAULT_ERROR_MARGIN", 0.1)?,
            budget_reduction_warning_threshold: parse_or(
                "BUDGET_REDUCTION_WARNING_THRESHOLD",
                0.3,
            )?,
        })
    }

    /// Fixed configuration for tests. No environment access.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            llm_provider: LlmProvider::OpenAi,
            api_key: "test-key".to_string(),
            openai_model: "gpt-4".to_string(),
            claude_model: "claude-3-sonnet-20240229".to_string(),
            database_url: "sqlite::memory:".to_string(),
            data_dir: PathBuf::from("./data"),
            port: 8080,
            rust_log: "info".to_string(),
            max_revision_cycles: 3,
            default_error_margin: 0.1,
            budget_reduction_warning_threshold: 0.3,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}
