//! Our World In Data CSV loader.
//!
//! # CSV format
//!
//! The public `owid-covid-data.csv` export: one row per (location, date),
//! dozens of columns.  Only these are read; the rest are ignored.
//!
//! ```csv
//! location,date,population,new_cases,new_deaths,new_vaccinations
//! Poland,2020-03-04,37846605,1,,
//! Poland,2020-03-05,37846605,0,,
//! Poland,2020-03-12,37846605,20,1,
//! ```
//!
//! **Numeric cells:**
//!
//! | Cell         | Value                                             |
//! |--------------|---------------------------------------------------|
//! | empty        | 0                                                 |
//! | `12.0`       | 12 (fractions truncated toward zero)              |
//! | negative     | 0, logged at `warn` (retroactive data corrections)|
//!
//! The population is taken from the first row of the location.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use log::{info, warn};
use serde::Deserialize;

use crate::{CountryData, DailyRecord, DataError, DataResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OwidRecord {
    location:         String,
    date:             NaiveDate,
    population:       Option<f64>,
    new_cases:        Option<f64>,
    new_deaths:       Option<f64>,
    new_vaccinations: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the daily series for `location` from an OWID CSV file.
pub fn load_country_csv(path: &Path, location: &str) -> DataResult<CountryData> {
    let file = std::fs::File::open(path)?;
    load_country_reader(file, location)
}

/// Like [`load_country_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or reading from a
/// decompression stream.
pub fn load_country_reader<R: Read>(reader: R, location: &str) -> DataResult<CountryData> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut population: Option<Option<f64>> = None;
    let mut days: Vec<DailyRecord> = Vec::new();

    for result in csv_reader.deserialize::<OwidRecord>() {
        let row = result?;
        if row.location != location {
            continue;
        }
        if population.is_none() {
            population = Some(row.population);
        }
        days.push(DailyRecord {
            date:             row.date,
            new_cases:        number(row.new_cases, "new_cases", row.date),
            new_deaths:       number(row.new_deaths, "new_deaths", row.date),
            new_vaccinations: number(row.new_vaccinations, "new_vaccinations", row.date),
        });
    }

    let Some(first_population) = population else {
        return Err(DataError::LocationNotFound(location.to_owned()));
    };
    let population = match first_population {
        Some(p) if p >= 1.0 => p as u64,
        value => {
            return Err(DataError::InvalidPopulation { location: location.to_owned(), value });
        }
    };

    days.sort_by_key(|d| d.date);
    info!("loaded {} days for {location} (population {population})", days.len());

    Ok(CountryData { location: location.to_owned(), population, days })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Convert an OWID numeric cell to a non-negative count.
fn number(cell: Option<f64>, column: &str, date: NaiveDate) -> u64 {
    match cell {
        None => 0,
        Some(v) if v < 0.0 => {
            warn!("{date}: negative {column} ({v}) treated as 0");
            0
        }
        Some(v) => v.trunc() as u64,
    }
}
