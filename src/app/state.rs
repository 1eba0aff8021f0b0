// ==========================================
// Catering Execution Hub - application state
// ==========================================
// Explicitly constructed, dependency-injected shared state: one
// AppState owns every repository, engine and API instance. Nothing
// in the crate is a module-level mutable global.
// ==========================================

use anyhow::Context;
use std::sync::{Arc, Mutex};

use crate::api::{AlcoholApi, BottleApi, DetectionApi, EfficiencyApi};
use crate::config::{
    AppConfig, ALCOHOL_DATASET_FILE, ALCOHOL_INFO_PACK_FILE, EFFICIENCY_DATASET_FILE,
    REALTIME_DATASET_FILE,
};
use crate::db;
use crate::detection::monitor::ErrorMonitor;
use crate::engine::dataset_rules::DatasetRuleEvaluator;
use crate::engine::decision_engine::BottleDecisionEngine;
use crate::importer::alcohol_importer::AlcoholImporter;
use crate::importer::efficiency_importer::EfficiencyImporter;
use crate::importer::info_pack::PlainTextExtractor;
use crate::importer::realtime_importer::RealtimeErrorImporter;
use crate::repository::efficiency_repo::{EfficiencyRepository, EmployeeMetricsRepository};
use crate::repository::record_repo::ImportedRecordRepository;

/// Application state: all API instances and shared resources.
pub struct AppState {
    /// Database file path
    pub db_path: String,

    /// Bottle decision API
    pub bottle_api: Arc<BottleApi>,

    /// Alcohol dataset API
    pub alcohol_api: Arc<AlcoholApi>,

    /// Packing efficiency API
    pub efficiency_api: Arc<EfficiencyApi>,

    /// Error detection API
    pub detection_api: Arc<DetectionApi>,
}

impl AppState {
    /// Build the full object graph: connection, repositories, engines,
    /// API instances. Seeds demo efficiency records on first run.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        tracing::info!("initializing AppState, database: {}", config.db_path);

        let conn = db::open_sqlite_connection(&config.db_path)
            .with_context(|| format!("could not open database {}", config.db_path))?;
        db::init_schema(&conn).context("could not initialize database schema")?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // Repository layer
        // ==========================================
        let alcohol_records = Arc::new(ImportedRecordRepository::alcohol(conn.clone()));
        let realtime_records = Arc::new(ImportedRecordRepository::realtime(conn.clone()));
        let efficiency_records = Arc::new(EfficiencyRepository::new(conn.clone()));
        let employee_metrics = Arc::new(EmployeeMetricsRepository::new(conn.clone()));

        // ==========================================
        // Engine layer
        // ==========================================
        let dataset_rules = DatasetRuleEvaluator::new(alcohol_records.clone());
        let decision_engine = Arc::new(BottleDecisionEngine::new(dataset_rules));
        let monitor = Arc::new(ErrorMonitor::new());

        // ==========================================
        // API layer
        // ==========================================
        let bottle_api = Arc::new(BottleApi::new(decision_engine));

        let alcohol_api = Arc::new(AlcoholApi::new(
            alcohol_records.clone(),
            AlcoholImporter::new(alcohol_records),
            Box::new(PlainTextExtractor),
            config.dataset_dir.join(ALCOHOL_DATASET_FILE),
            config.dataset_dir.join(ALCOHOL_INFO_PACK_FILE),
        ));

        let efficiency_importer =
            EfficiencyImporter::new(efficiency_records.clone(), employee_metrics.clone());
        let seeded = efficiency_importer
            .seed_mock_records_if_empty()
            .context("could not seed demo efficiency records")?;
        if seeded > 0 {
            tracing::info!(seeded, "seeded demo efficiency records");
        }
        let efficiency_api = Arc::new(EfficiencyApi::new(
            efficiency_records,
            employee_metrics,
            efficiency_importer,
            config.dataset_dir.join(EFFICIENCY_DATASET_FILE),
        ));

        let detection_api = Arc::new(DetectionApi::new(
            monitor,
            realtime_records.clone(),
            RealtimeErrorImporter::new(realtime_records),
            config.dataset_dir.join(REALTIME_DATASET_FILE),
        ));

        tracing::info!("AppState initialized");
        Ok(Self {
            db_path: config.db_path.clone(),
            bottle_api,
            alcohol_api,
            efficiency_api,
            detection_api,
        })
    }
}
