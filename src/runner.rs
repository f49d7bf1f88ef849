//! Import run orchestration
//!
//! Opens both stores, runs the pipeline for the configured dataset and times it.

use std::time::Instant;

use thiserror::Error;

use crate::config::{ImportConfig, ImportMode};
use crate::db::{self, Database, DbError};
use crate::import::{
    BrandedFoods, CancelFlag, ImportError, ImportPipeline, ImportReport, RecordSource,
    SourceError, SqliteSink, SqliteSource, SurveyFoods,
};

/// Errors that end an import run
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to open {store} database: {source}")]
    Connection {
        store: &'static str,
        #[source]
        source: DbError,
    },

    #[error("Failed to count USDA records: {0}")]
    Count(#[source] SourceError),

    /// The pipeline stopped early; the report holds the progress made
    #[error("Import stopped: {error}")]
    Interrupted {
        report: ImportReport,
        #[source]
        error: ImportError,
    },
}

/// Run one import as described by `config`
pub fn run_import(config: &ImportConfig, cancel: CancelFlag) -> Result<ImportReport, RunError> {
    let connection = |store: &'static str| move |source: DbError| RunError::Connection { store, source };

    tracing::info!("Connecting to food database {}", config.food_database_path.display());
    let food_db = Database::new(&config.food_database_path).map_err(connection("food"))?;
    let mut food_conn = food_db.get_conn().map_err(connection("food"))?;
    db::run_migrations(&food_conn, &config.food_table).map_err(connection("food"))?;

    tracing::info!("Connecting to USDA database {}", config.usda_database_path.display());
    let usda_db = Database::open_read_only(&config.usda_database_path).map_err(connection("USDA"))?;
    let usda_conn = usda_db.get_conn().map_err(connection("USDA"))?;

    let mut source = SqliteSource::new(&usda_conn, &config.usda_table).map_err(|e| match e {
        SourceError::Db(source) => RunError::Connection {
            store: "USDA",
            source,
        },
    })?;
    let total_records = source.count().map_err(RunError::Count)?;
    tracing::info!("Found {} {} foods to import", total_records, config.mode);

    let sink = SqliteSink::new(&mut food_conn, &config.food_table);
    let mut pipeline = ImportPipeline::new(source, sink)
        .with_batch_size(config.batch_size)
        .with_expected_total(total_records)
        .with_cancel_flag(cancel);

    tracing::info!("Starting import of {} foods...", config.mode);
    let started = Instant::now();
    let result = match config.mode {
        ImportMode::Survey => pipeline.run::<SurveyFoods>(),
        ImportMode::Branded => pipeline.run::<BrandedFoods>(),
    };
    let duration = started.elapsed();

    match result {
        Ok(stats) => Ok(ImportReport::new(config.mode, total_records, stats, duration)),
        Err(partial) => Err(RunError::Interrupted {
            report: ImportReport::new(config.mode, total_records, partial.stats, duration),
            error: partial.error,
        }),
    }
}
