//! Import configuration
//!
//! Resolves store locations from the environment (optionally a `.env` file).

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;

use crate::db::is_valid_table_name;

/// Records per bulk write unless overridden
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Default target table
pub const DEFAULT_FOOD_TABLE: &str = "foods";

/// Configuration error types
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is not a valid table name: {value:?}")]
    InvalidTable { var: &'static str, value: String },

    #[error("IMPORT_BATCH_SIZE must be a positive integer, got {0:?}")]
    InvalidBatchSize(String),
}

/// Which USDA dataset to import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    Survey,
    Branded,
}

impl ImportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportMode::Survey => "survey",
            ImportMode::Branded => "branded",
        }
    }

    /// Environment variable naming the source table for this mode
    pub fn source_table_var(&self) -> &'static str {
        match self {
            ImportMode::Survey => "USDA_SURVEY_TABLE",
            ImportMode::Branded => "USDA_BRANDED_TABLE",
        }
    }
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved configuration for one import run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportConfig {
    pub mode: ImportMode,
    pub food_database_path: PathBuf,
    pub food_table: String,
    pub usda_database_path: PathBuf,
    pub usda_table: String,
    pub batch_size: usize,
}

impl ImportConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env(mode: ImportMode) -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_err() {
            tracing::warn!(".env file not found, using system environment variables");
        }
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(mode, &vars)
    }

    /// Build the configuration from a set of variables
    pub fn from_vars(mode: ImportMode, vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let lookup = |name: &'static str| -> Option<String> {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));
        let table = |name: &'static str, value: String| {
            if is_valid_table_name(&value) {
                Ok(value)
            } else {
                Err(ConfigError::InvalidTable { var: name, value })
            }
        };

        let food_database_path = PathBuf::from(required("FOOD_DATABASE_PATH")?);
        let food_table = table(
            "FOOD_TABLE",
            lookup("FOOD_TABLE").unwrap_or_else(|| DEFAULT_FOOD_TABLE.to_string()),
        )?;
        let usda_database_path = PathBuf::from(required("USDA_DATABASE_PATH")?);
        let table_var = mode.source_table_var();
        let usda_table = table(table_var, required(table_var)?)?;

        let batch_size = match lookup("IMPORT_BATCH_SIZE") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidBatchSize(raw)),
            },
            None => DEFAULT_BATCH_SIZE,
        };

        Ok(Self {
            mode,
            food_database_path,
            food_table,
            usda_database_path,
            usda_table,
            batch_size,
        })
    }
}
