//! Plain data types handed from the loader to the driver.

use chrono::NaiveDate;

/// New events reported for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRecord {
    pub date:             NaiveDate,
    pub new_cases:        u64,
    pub new_deaths:       u64,
    pub new_vaccinations: u64,
}

/// Everything the driver needs for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryData {
    pub location:   String,
    /// Population at the start of the series.
    pub population: u64,
    /// Days in ascending date order.
    pub days:       Vec<DailyRecord>,
}

impl CountryData {
    /// First and last reported date, if any.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.days.first()?.date, self.days.last()?.date))
    }
}
