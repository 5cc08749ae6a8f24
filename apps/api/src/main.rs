mod config;
mod db;
mod errors;
mod generation;
mod history;
mod llm_client;
mod manifest;
mod models;
mod profiles;
mod routes;
mod state;
mod storage;
mod templates;

use std::net::SocketAddr;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::FileStore;

/// Default `RUST_LOG` directive, scoped to this binary's tracing targets.
/// The prefix must be the compiled crate name, which is what `module_path!()`
/// (and therefore every event target in this service) starts with.
fn default_log_filter(level: &str) -> String {
    format!("{}={level}", env!("CARGO_CRATE_NAME"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter(&config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Quill API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the on-disk data layout first; the SQLite file lives in it
    let store = FileStore::new(&config.data_dir)?;
    store.ensure_builtin_templates().await?;
    info!("File store ready at {}", config.data_dir.display());

    // Initialize SQLite
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    // Initialize LLM client
    let llm = LlmClient::from_config(&config);
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState {
        db,
        store,
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter_targets_this_crate() {
        // Event targets derive from module_path!(), so the directive prefix
        // must match its first segment or the filter silently drops everything.
        let crate_name = module_path!().split("::").next().unwrap();
        assert_eq!(default_log_filter("info"), format!("{crate_name}=info"));
    }

    #[test]
    fn test_default_log_filter_enables_service_events() {
        let filter = EnvFilter::new(default_log_filter("info"));
        assert!(
            format!("{filter}").starts_with(module_path!().split("::").next().unwrap()),
            "filter directive must name the compiled crate: {filter}"
        );
    }
}
