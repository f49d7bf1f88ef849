//! Record sources
//!
//! A forward-only stream of raw USDA documents.

use std::collections::VecDeque;

use rusqlite::{params, Connection};
use thiserror::Error;

use crate::db::{ensure_table, DbError};

/// Source error types
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read USDA source: {0}")]
    Db(#[from] DbError),
}

impl From<rusqlite::Error> for SourceError {
    fn from(e: rusqlite::Error) -> Self {
        SourceError::Db(DbError::Sqlite(e))
    }
}

/// An undecoded source document
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// Position of the document in the source, for log lines
    pub key: i64,
    pub body: String,
}

/// A finite, forward-only sequence of raw documents
pub trait RecordSource {
    /// Total number of documents; only used for progress estimates
    fn count(&mut self) -> Result<u64, SourceError>;

    /// Next document, or `None` when the source is exhausted
    fn next_document(&mut self) -> Result<Option<RawDocument>, SourceError>;
}

impl<T: RecordSource + ?Sized> RecordSource for &mut T {
    fn count(&mut self) -> Result<u64, SourceError> {
        (**self).count()
    }

    fn next_document(&mut self) -> Result<Option<RawDocument>, SourceError> {
        (**self).next_document()
    }
}

/// Rows fetched per round trip
const PAGE_SIZE: usize = 500;

/// Reads JSON documents from a SQLite table in rowid order
///
/// Pages are fetched lazily with keyset pagination, so only one page is held in memory.
pub struct SqliteSource<'c> {
    conn: &'c Connection,
    table: String,
    last_rowid: i64,
    buffer: VecDeque<RawDocument>,
    exhausted: bool,
    page_size: usize,
}

impl<'c> SqliteSource<'c> {
    /// Open a source over `table`, which must exist and be a valid identifier
    pub fn new(conn: &'c Connection, table: &str) -> Result<Self, SourceError> {
        ensure_table(conn, table)?;
        Ok(Self {
            conn,
            table: table.to_string(),
            last_rowid: 0,
            buffer: VecDeque::new(),
            exhausted: false,
            page_size: PAGE_SIZE,
        })
    }

    fn fetch_page(&mut self) -> Result<(), SourceError> {
        let sql = format!(
            "SELECT rowid, document FROM {} WHERE rowid > ?1 ORDER BY rowid LIMIT ?2",
            self.table
        );
        let conn = self.conn;
        let mut stmt = conn.prepare_cached(&sql)?;
        let rows = stmt
            .query_map(params![self.last_rowid, self.page_size as i64], |row| {
                Ok(RawDocument {
                    key: row.get(0)?,
                    body: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if rows.len() < self.page_size {
            self.exhausted = true;
        }
        if let Some(last) = rows.last() {
            self.last_rowid = last.key;
        }
        self.buffer.extend(rows);
        Ok(())
    }
}

impl RecordSource for SqliteSource<'_> {
    fn count(&mut self) -> Result<u64, SourceError> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(count.max(0) as u64)
    }

    fn next_document(&mut self) -> Result<Option<RawDocument>, SourceError> {
        if self.buffer.is_empty() && !self.exhausted {
            self.fetch_page()?;
        }
        Ok(self.buffer.pop_front())
    }
}
