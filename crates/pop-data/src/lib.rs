//! `pop-data` — input records for the day-by-day driver.
//!
//! | Module       | Contents                                            |
//! |--------------|-----------------------------------------------------|
//! | [`record`]   | `DailyRecord`, `CountryData`                        |
//! | [`owid`]     | Our World In Data CSV loader                        |
//! | [`error`]    | `DataError`, `DataResult`                           |

pub mod error;
pub mod owid;
pub mod record;

#[cfg(test)]
mod tests;

pub use error::{DataError, DataResult};
pub use owid::{load_country_csv, load_country_reader};
pub use record::{CountryData, DailyRecord};
