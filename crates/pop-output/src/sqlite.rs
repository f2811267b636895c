//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! one long-format table, `daily_metrics(date, metric, value)`, so any
//! scenario's metric set fits without schema changes.

use std::path::Path;

use rusqlite::Connection;

use pop_sim::DailyReport;

use crate::OutputResult;
use crate::writer::ReportWriter;

/// Writes daily reports to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS daily_metrics (
                 date   TEXT    NOT NULL,
                 metric TEXT    NOT NULL,
                 value  INTEGER NOT NULL,
                 PRIMARY KEY (date, metric)
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl ReportWriter for SqliteWriter {
    fn write_report(&mut self, report: &DailyReport) -> OutputResult<()> {
        if report.metrics.is_empty() {
            return Ok(());
        }
        let date = report.date.to_string();
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO daily_metrics (date, metric, value) \
                 VALUES (?1, ?2, ?3)",
            )?;
            for m in &report.metrics {
                stmt.execute(rusqlite::params![date, m.name, m.value as i64])?;
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
