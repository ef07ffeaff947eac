//! SQLite output backend (feature `sqlite`).
//!
//! Creates (or reuses) a database with one table:
//!
//! ```sql
//! associations(step INTEGER NOT NULL, vehicle_id TEXT NOT NULL, site_id TEXT)
//! ```
//!
//! Existing rows are cleared on open, matching the CSV backend's truncate.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::AssociationWriter;
use crate::{AssociationRow, OutputResult};

/// Writes association snapshots to an SQLite database.
pub struct SqliteAssociationWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteAssociationWriter {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS associations (
                 step       INTEGER NOT NULL,
                 vehicle_id TEXT    NOT NULL,
                 site_id    TEXT
             );
             CREATE INDEX IF NOT EXISTS associations_step ON associations (step);
             DELETE FROM associations;",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl AssociationWriter for SqliteAssociationWriter {
    fn write_snapshot(&mut self, rows: &[AssociationRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO associations (step, vehicle_id, site_id) VALUES (?1, ?2, ?3)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.step, row.vehicle_id, row.site_id])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
