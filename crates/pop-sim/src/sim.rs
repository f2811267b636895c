//! The `Sim` struct and its day loop.

use chrono::NaiveDate;
use log::{info, warn};

use pop_core::{ShortfallPolicy, SimConfig};
use pop_data::DailyRecord;
use pop_engine::BucketedPopulation;

use crate::{DailyReport, Person, Scenario, SimError, SimObserver, SimResult};

// ── DayContext ────────────────────────────────────────────────────────────────

/// What a scenario sees while applying one day.
///
/// Wraps the population so every `affect` goes through the run's
/// [`ShortfallPolicy`] and failures carry the event name and date.
pub struct DayContext<'a> {
    pub population: &'a mut BucketedPopulation<Person>,
    pub config:     &'a SimConfig,
    pub date:       NaiveDate,
}

impl DayContext<'_> {
    /// Move `size` persons matching `predicate` to `transform(person)`.
    ///
    /// Under [`ShortfallPolicy::Clamp`] a request larger than the eligible
    /// group is logged and reduced to the group's size.
    pub fn affect<P, T>(
        &mut self,
        event:     &'static str,
        size:      u64,
        predicate: P,
        transform: T,
    ) -> SimResult<u64>
    where
        P: Fn(&Person) -> bool,
        T: Fn(&Person) -> Person,
    {
        let size = match self.config.shortfall {
            ShortfallPolicy::Abort => size,
            ShortfallPolicy::Clamp => {
                let available = self.population.count(&predicate);
                if size > available {
                    warn!(
                        "{}: {event} requested {size} but only {available} eligible; clamping",
                        self.date
                    );
                }
                size.min(available)
            }
        };
        self.population
            .affect(size, predicate, transform)
            .map_err(|source| SimError::Affect { event, date: self.date, source })
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: Scenario> {
    /// Configuration the population was built from.
    pub config: SimConfig,

    /// The bucketed population.  Exclusively owned by this `Sim`.
    pub population: BucketedPopulation<Person>,

    /// Translates daily deltas into `affect` calls and metrics.
    pub scenario: S,

    /// Days applied so far.
    pub days_run: usize,
}

impl<S: Scenario> Sim<S> {
    /// Apply one day of deltas and return that day's report.
    ///
    /// On error the day is abandoned; `affect` calls already made for earlier
    /// events of the same day stay applied.
    pub fn step(&mut self, day: &DailyRecord) -> SimResult<DailyReport> {
        let mut ctx = DayContext {
            population: &mut self.population,
            config:     &self.config,
            date:       day.date,
        };
        self.scenario.step(&mut ctx, day)?;
        self.days_run += 1;
        Ok(self.scenario.report(&self.population, day.date))
    }

    /// Run every day in `days`, in order.
    pub fn run<O: SimObserver>(&mut self, days: &[DailyRecord], observer: &mut O) -> SimResult<()> {
        info!(
            "{} scenario: {} days, population {}, sampling {}",
            self.scenario.name(),
            days.len(),
            self.population.len(),
            self.population.sampling(),
        );
        for day in days {
            observer.on_day_start(day);
            let report = self.step(day)?;
            observer.on_day_end(&report);
        }
        observer.on_sim_end(self.days_run);
        info!(
            "finished after {} days with {} buckets",
            self.days_run,
            self.population.distinct()
        );
        Ok(())
    }
}
