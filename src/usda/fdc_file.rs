//! FoodData Central download loader
//!
//! Copies documents from an FDC JSON download into a source table. Accepts the
//! official layout (`{"SurveyFoods": [...]}` / `{"BrandedFoods": [...]}`), a bare
//! JSON array, or JSON Lines (one document per line, `.jsonl` / `.ndjson`).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rusqlite::{params, Connection};
use serde_json::Value;
use thiserror::Error;

use crate::db::{create_source_table, DbError};

/// Top-level keys used by FDC full downloads
pub const FDC_ARRAY_KEYS: [&str; 2] = ["SurveyFoods", "BrandedFoods"];

/// Loader error types
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("No food array found; expected SurveyFoods, BrandedFoods or a top-level array")]
    UnknownLayout,
}

impl From<rusqlite::Error> for LoadError {
    fn from(e: rusqlite::Error) -> Self {
        LoadError::Db(DbError::Sqlite(e))
    }
}

/// Load an FDC file into `table`, creating it if needed. Returns documents written.
pub fn load_fdc_file(conn: &mut Connection, table: &str, path: &Path) -> Result<u64, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;
    let reader = BufReader::new(file);

    create_source_table(conn, table)?;

    let is_lines = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("jsonl") | Some("ndjson")
    );

    let tx = conn.transaction()?;
    let mut written = 0u64;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {} (fdc_id, document) VALUES (?1, ?2)",
            table
        ))?;
        let mut insert = |doc: &Value| -> Result<(), LoadError> {
            let fdc_id = doc.get("fdcId").and_then(Value::as_i64);
            stmt.execute(params![fdc_id, doc.to_string()])?;
            written += 1;
            Ok(())
        };

        if is_lines {
            for line in reader.lines() {
                let line = line.map_err(io_err)?;
                if line.trim().is_empty() {
                    continue;
                }
                insert(&serde_json::from_str(&line)?)?;
            }
        } else {
            let root: Value = serde_json::from_reader(reader)?;
            for doc in food_array(&root).ok_or(LoadError::UnknownLayout)? {
                insert(doc)?;
            }
        }
    }
    tx.commit()?;

    tracing::info!("Loaded {} documents into {}", written, table);
    Ok(written)
}

fn food_array(root: &Value) -> Option<&Vec<Value>> {
    if let Some(array) = root.as_array() {
        return Some(array);
    }
    FDC_ARRAY_KEYS
        .iter()
        .find_map(|key| root.get(*key).and_then(Value::as_array))
}
