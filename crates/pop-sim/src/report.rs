//! Daily metric reports.

use std::fmt;

use chrono::NaiveDate;

/// One named integer derived from a single `count(predicate)` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metric {
    pub name:  &'static str,
    pub value: u64,
}

/// The metrics of one simulated day, in the scenario's column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub date:    NaiveDate,
    pub metrics: Vec<Metric>,
}

impl DailyReport {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, metrics: Vec::new() }
    }

    /// Append a metric (builder style).
    pub fn with(mut self, name: &'static str, value: u64) -> Self {
        self.metrics.push(Metric { name, value });
        self
    }

    /// Value of the metric called `name`.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.metrics.iter().find(|m| m.name == name).map(|m| m.value)
    }

    /// Metric names in column order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.metrics.iter().map(|m| m.name)
    }
}

impl fmt::Display for DailyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)?;
        for m in &self.metrics {
            write!(f, " {}={}", m.name, m.value)?;
        }
        Ok(())
    }
}
