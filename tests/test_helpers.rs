// ==========================================
// Shared test helpers
// ==========================================
// Temp-file databases plus a fully wired AppState. Each test gets its
// own database; the NamedTempFile must stay alive for the duration.
// ==========================================

use catering_hub::app::AppState;
use catering_hub::config::AppConfig;
use catering_hub::db;
use catering_hub::domain::bottle::{Bottle, Cleanliness, LabelStatus, SealStatus};
use rusqlite::Connection;
use std::error::Error;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Create a temp database with the schema applied.
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = Connection::open(&db_path)?;
    db::init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// Open a second, independently configured connection to a test database.
pub fn open_shared_conn(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    Ok(Arc::new(Mutex::new(db::open_sqlite_connection(db_path)?)))
}

/// A fully wired AppState over a fresh temp database.
///
/// Note: AppState seeds the five demo efficiency records on first run.
pub fn create_test_state() -> Result<(NamedTempFile, AppState), Box<dyn Error>> {
    let (temp_file, db_path) = create_test_db()?;
    let config = AppConfig {
        db_path: db_path.clone(),
        http_port: 0,
        dataset_dir: PathBuf::from("nonexistent-datasets"),
    };
    let state = AppState::new(&config)?;
    Ok((temp_file, state))
}

/// Bottle fixture with sensible defaults.
pub fn make_bottle(
    customer_code: &str,
    fill_level: f64,
    seal_status: SealStatus,
    cleanliness: Cleanliness,
    label_status: LabelStatus,
) -> Bottle {
    Bottle {
        customer_code: customer_code.to_string(),
        fill_level,
        seal_status,
        cleanliness,
        label_status,
    }
}
