//! Food sinks
//!
//! Bulk writers for mapped food documents.

use rusqlite::{params, Connection};
use thiserror::Error;

use crate::db::DbError;
use crate::models::Food;

/// Sink error types
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write foods: {0}")]
    Db(#[from] DbError),

    #[error("Failed to serialize food {id}: {source}")]
    Serialize {
        id: i64,
        #[source]
        source: serde_json::Error,
    },
}

impl From<rusqlite::Error> for SinkError {
    fn from(e: rusqlite::Error) -> Self {
        SinkError::Db(DbError::Sqlite(e))
    }
}

/// Accepts ordered, non-empty batches of food documents
pub trait FoodSink {
    /// Write one batch. A failed call may have partially applied.
    fn insert_batch(&mut self, batch: &[Food]) -> Result<(), SinkError>;
}

impl<T: FoodSink + ?Sized> FoodSink for &mut T {
    fn insert_batch(&mut self, batch: &[Food]) -> Result<(), SinkError> {
        (**self).insert_batch(batch)
    }
}

/// Writes food documents into a migrated SQLite food table
pub struct SqliteSink<'c> {
    conn: &'c mut Connection,
    table: String,
}

impl<'c> SqliteSink<'c> {
    /// `table` must already be migrated (see [`crate::db::run_migrations`])
    pub fn new(conn: &'c mut Connection, table: &str) -> Self {
        Self {
            conn,
            table: table.to_string(),
        }
    }
}

impl FoodSink for SqliteSink<'_> {
    fn insert_batch(&mut self, batch: &[Food]) -> Result<(), SinkError> {
        let sql = format!(
            "INSERT INTO {} (food_id, description, food_request_type, data_source, document)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            self.table
        );

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(&sql)?;
            for food in batch {
                let document = food.to_document().map_err(|source| SinkError::Serialize {
                    id: food.id,
                    source,
                })?;
                stmt.execute(params![
                    food.id,
                    food.description,
                    food.food_request_type.as_str(),
                    food.data_source,
                    document,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;
    use crate::models::FoodRequestType;

    #[test]
    fn test_insert_batch() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, "foods").unwrap();

        let batch: Vec<Food> = (1..=3)
            .map(|id| {
                let mut food = Food::new(id, format!("Food {}", id));
                food.food_request_type = FoodRequestType::Whole;
                food.data_source = "USDA-FNDDS".to_string();
                food
            })
            .collect();

        SqliteSink::new(&mut conn, "foods").insert_batch(&batch).unwrap();

        let rows: Vec<(i64, String, String)> = conn
            .prepare("SELECT food_id, food_request_type, document FROM foods ORDER BY row_id")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].0, 1);
        assert_eq!(rows[2].1, "whole");

        let stored: Food = serde_json::from_str(&rows[1].2).unwrap();
        assert_eq!(stored, batch[1]);
    }

    #[test]
    fn test_unmigrated_table_fails() {
        let mut conn = Connection::open_in_memory().unwrap();
        let result = SqliteSink::new(&mut conn, "foods").insert_batch(&[Food::new(1, "Apple")]);
        assert!(matches!(result, Err(SinkError::Db(_))));
    }
}
