use sqlx::SqlitePool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::storage::FileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub store: FileStore,
    pub llm: LlmClient,
    pub config: Config,
}
