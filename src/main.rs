// ==========================================
// Catering Execution Hub - server entry point
// ==========================================
// Stack: Rust + axum + SQLite
// ==========================================

use catering_hub::app::{http, AppState};
use catering_hub::{config::AppConfig, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", catering_hub::APP_NAME);
    tracing::info!("version: {}", catering_hub::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env();
    tracing::info!("database: {}", config.db_path);
    tracing::info!("dataset dir: {}", config.dataset_dir.display());

    let state = AppState::new(&config)?;

    http::serve(state, config.http_port).await
}
