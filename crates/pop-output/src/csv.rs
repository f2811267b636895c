//! CSV output backend.
//!
//! Creates `daily_reports.csv` in the configured output directory: one row
//! per day, a `date` column followed by one column per metric.  The header
//! is taken from the first report, so every later report must carry the
//! same metrics in the same order.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use pop_sim::DailyReport;

use crate::writer::ReportWriter;
use crate::{OutputError, OutputResult};

/// Writes daily reports to a CSV file.
pub struct CsvWriter {
    reports:  Writer<File>,
    columns:  Option<Vec<&'static str>>,
    finished: bool,
}

impl CsvWriter {
    /// Create `daily_reports.csv` in `dir`.  The header row is written with
    /// the first report.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let reports = Writer::from_path(dir.join("daily_reports.csv"))?;
        Ok(Self { reports, columns: None, finished: false })
    }

    fn check_columns(&mut self, report: &DailyReport) -> OutputResult<()> {
        let got: Vec<&'static str> = report.names().collect();
        match &self.columns {
            Some(expected) if *expected != got => Err(OutputError::Columns {
                expected: expected.clone(),
                got,
            }),
            Some(_) => Ok(()),
            None => {
                let mut header = vec!["date"];
                header.extend(got.iter().copied());
                self.reports.write_record(&header)?;
                self.columns = Some(got);
                Ok(())
            }
        }
    }
}

impl ReportWriter for CsvWriter {
    fn write_report(&mut self, report: &DailyReport) -> OutputResult<()> {
        self.check_columns(report)?;
        let mut row = Vec::with_capacity(report.metrics.len() + 1);
        row.push(report.date.to_string());
        row.extend(report.metrics.iter().map(|m| m.value.to_string()));
        self.reports.write_record(&row)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.reports.flush()?;
        Ok(())
    }
}
