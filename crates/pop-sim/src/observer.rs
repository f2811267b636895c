//! Simulation observer trait for progress reporting and data collection.

use pop_data::DailyRecord;

use crate::DailyReport;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] around each day.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct Dots;
///
/// impl SimObserver for Dots {
///     fn on_day_end(&mut self, _report: &DailyReport) {
///         eprint!(".");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the day's deltas are applied.
    fn on_day_start(&mut self, _day: &DailyRecord) {}

    /// Called with the report computed after the day's deltas.
    fn on_day_end(&mut self, _report: &DailyReport) {}

    /// Called once after the last day.  `days` is the number of days run by
    /// this simulation so far.
    fn on_sim_end(&mut self, _days: usize) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct ReportCollector {
    pub reports: Vec<DailyReport>,
}

impl SimObserver for ReportCollector {
    fn on_day_end(&mut self, report: &DailyReport) {
        self.reports.push(report.clone());
    }
}
