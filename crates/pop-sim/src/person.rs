//! The feature record used by the bundled scenarios.

use chrono::{NaiveDate, TimeDelta};

/// One class of person.
///
/// Dates are part of the key, so every vaccination day (and, in the
/// mortality scenario, every death day) opens new buckets.  A few hundred
/// days of data yield a few hundred buckets per distinct date field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Person {
    pub alive:      bool,
    pub infected:   bool,
    pub died:       Option<NaiveDate>,
    pub vaccinated: Option<NaiveDate>,
}

impl Default for Person {
    /// Alive, never infected, never vaccinated.
    fn default() -> Self {
        Self { alive: true, infected: false, died: None, vaccinated: None }
    }
}

impl Person {
    pub fn with_infected(&self) -> Self {
        Self { infected: true, ..*self }
    }

    /// Dead, without recording when.
    pub fn with_dead(&self) -> Self {
        Self { alive: false, ..*self }
    }

    pub fn with_died(&self, date: NaiveDate) -> Self {
        Self { alive: false, died: Some(date), ..*self }
    }

    pub fn with_vaccinated(&self, date: NaiveDate) -> Self {
        Self { vaccinated: Some(date), ..*self }
    }

    /// Vaccinated strictly more than `immunity_days` before `today`.
    pub fn is_protected(&self, today: NaiveDate, immunity_days: u32) -> bool {
        self.vaccinated
            .is_some_and(|v| (today - v).num_days() > i64::from(immunity_days))
    }

    /// Died less than `window` after being vaccinated.
    pub fn died_within(&self, window: TimeDelta) -> bool {
        match (self.died, self.vaccinated) {
            (Some(died), Some(vaccinated)) => died - vaccinated < window,
            _ => false,
        }
    }
}
