//! The `ReportWriter` trait implemented by all backend writers.

use pop_sim::DailyReport;

use crate::OutputResult;

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are returned to the caller; [`ReportObserver`][crate::ReportObserver]
/// stores them for retrieval after the run.
pub trait ReportWriter {
    /// Write one day's report.
    fn write_report(&mut self, report: &DailyReport) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
