//! `pop-output` — daily report writers for the popsim framework.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend     | Files created          |
//! |-----------|-------------|------------------------|
//! | *(none)*  | CSV         | `daily_reports.csv`    |
//! | `sqlite`  | SQLite      | `output.db`            |
//!
//! Both implement [`ReportWriter`] and are driven by [`ReportObserver`],
//! which implements `pop_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pop_output::{CsvWriter, ReportObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ReportObserver::new(writer);
//! sim.run(&data.days, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     log::error!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ReportObserver;
pub use writer::ReportWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
