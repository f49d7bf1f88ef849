//! Database migrations
//!
//! Schema for the target food table and the USDA source document tables.

use rusqlite::{params, Connection};

use super::connection::DbResult;

/// Current schema version of the food table
const SCHEMA_VERSION: i32 = 1;

/// Whether a name can be spliced into SQL as a table identifier
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Bring the food table up to the current schema version
///
/// Versions are tracked per table so one database can hold several import targets.
/// `table` must satisfy [`is_valid_table_name`].
pub fn run_migrations(conn: &Connection, table: &str) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            table_name TEXT NOT NULL,
            version INTEGER NOT NULL,
            applied_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (table_name, version)
        )",
        [],
    )?;

    let current_version = get_schema_version(conn, table)?;

    if current_version < 1 {
        migrate_v1(conn, table)?;
        conn.execute(
            "INSERT INTO schema_migrations (table_name, version) VALUES (?1, 1)",
            params![table],
        )?;
        tracing::info!("Migrated table {} to schema version 1", table);
    }

    Ok(())
}

/// Migration v1: food documents
///
/// `food_id` is the run-local sequence number and is deliberately not unique.
fn migrate_v1(conn: &Connection, table: &str) -> DbResult<()> {
    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            row_id INTEGER PRIMARY KEY AUTOINCREMENT,
            food_id INTEGER NOT NULL,
            description TEXT NOT NULL,
            food_request_type TEXT NOT NULL,
            data_source TEXT NOT NULL,
            document TEXT NOT NULL,           -- JSON food document
            imported_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_{table}_food_id ON {table}(food_id);
        CREATE INDEX IF NOT EXISTS idx_{table}_description ON {table}(description);
        "#,
        table = table
    ))?;

    Ok(())
}

/// Get the schema version of a food table (0 when never migrated)
pub fn get_schema_version(conn: &Connection, table: &str) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations WHERE table_name = ?1",
        params![table],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Create a USDA source table holding one JSON document per row
pub fn create_source_table(conn: &Connection, table: &str) -> DbResult<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            fdc_id INTEGER,
            document TEXT NOT NULL
        );",
        table = table
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_table_names() {
        assert!(is_valid_table_name("foods"));
        assert!(is_valid_table_name("_usda_survey_2024"));
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("2024_foods"));
        assert!(!is_valid_table_name("foods; DROP TABLE foods"));
        assert!(!is_valid_table_name("usda-foods"));
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, "foods").unwrap();
        run_migrations(&conn, "foods").unwrap();

        assert_eq!(get_schema_version(&conn, "foods").unwrap(), SCHEMA_VERSION);
        assert_eq!(get_schema_version(&conn, "foods_staging").unwrap(), 0);
    }

    #[test]
    fn test_food_ids_may_repeat() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, "foods").unwrap();

        for _ in 0..2 {
            conn.execute(
                "INSERT INTO foods (food_id, description, food_request_type, data_source, document)
                 VALUES (1, 'Apple', 'whole', 'USDA-FNDDS', '{}')",
                [],
            )
            .unwrap();
        }
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM foods WHERE food_id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_create_source_table() {
        let conn = Connection::open_in_memory().unwrap();
        create_source_table(&conn, "survey_foods").unwrap();
        create_source_table(&conn, "survey_foods").unwrap();
        conn.execute(
            "INSERT INTO survey_foods (fdc_id, document) VALUES (1, '{}')",
            [],
        )
        .unwrap();
    }
}
