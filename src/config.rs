// ==========================================
// Catering Execution Hub - runtime configuration
// ==========================================
// Environment-derived settings only; demo datasets live in a
// directory next to the binary unless overridden.
// ==========================================

use std::path::PathBuf;

/// Default HTTP port for the JSON API.
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// Default dataset file names looked up under `dataset_dir` when an import
/// request does not name a file explicitly.
pub const ALCOHOL_DATASET_FILE: &str = "alcohol_bottle_handling.xlsx";
pub const ALCOHOL_INFO_PACK_FILE: &str = "alcohol_info_pack.txt";
pub const EFFICIENCY_DATASET_FILE: &str = "employee_efficiency.xlsx";
pub const REALTIME_DATASET_FILE: &str = "realtime_error_detection.xlsx";

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file path
    pub db_path: String,

    /// HTTP listen port
    pub http_port: u16,

    /// Directory holding the demo dataset files
    pub dataset_dir: PathBuf,
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// platform defaults.
    ///
    /// # Environment
    /// - CATERING_HUB_DB: database file path (default: per-user data dir)
    /// - CATERING_HUB_PORT: HTTP port (default: 5000)
    /// - CATERING_HUB_DATASETS: dataset directory (default: ./datasets)
    pub fn from_env() -> Self {
        let db_path = std::env::var("CATERING_HUB_DB")
            .unwrap_or_else(|_| default_db_path());

        let http_port = std::env::var("CATERING_HUB_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);

        let dataset_dir = std::env::var("CATERING_HUB_DATASETS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("datasets"));

        Self {
            db_path,
            http_port,
            dataset_dir,
        }
    }
}

/// Default database location under the per-user data directory.
///
/// Falls back to the current directory when no data dir is available
/// (e.g. stripped-down containers).
pub fn default_db_path() -> String {
    let mut dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.push("catering-hub");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!("could not create data dir {}: {}", dir.display(), e);
        return "catering-hub.db".to_string();
    }
    dir.push("app.db");
    dir.to_string_lossy().to_string()
}
