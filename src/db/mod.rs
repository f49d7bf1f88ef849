//! Database module
//!
//! SQLite pools, the food table schema and source table helpers.

pub mod connection;
pub mod migrations;

pub use connection::{ensure_table, Database, DbError, DbResult};
pub use migrations::{create_source_table, is_valid_table_name, run_migrations};
