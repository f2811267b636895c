//! Scenarios: how one day of deltas becomes `affect` calls, and which
//! metrics are reported.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, TimeDelta};

use pop_core::PopError;
use pop_data::DailyRecord;
use pop_engine::BucketedPopulation;

use crate::{DailyReport, DayContext, Person, SimResult};

/// Turns daily deltas into population moves and reports.
///
/// `Send + Sync` so one scenario value can drive a parallel batch.
pub trait Scenario: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Apply one day.
    fn step(&self, ctx: &mut DayContext<'_>, day: &DailyRecord) -> SimResult<()>;

    /// Reduce the population to the day's metrics.  Every metric is a single
    /// `count(predicate)` call.
    fn report(&self, population: &BucketedPopulation<Person>, date: NaiveDate) -> DailyReport;
}

// ── Outbreak ──────────────────────────────────────────────────────────────────

/// Reported deaths, cases and vaccinations, in that order.
///
/// - deaths strike the living infected;
/// - cases strike the living, uninfected and unprotected;
/// - vaccinations go to the living, uninfected and unvaccinated.
#[derive(Copy, Clone, Debug, Default)]
pub struct Outbreak;

impl Scenario for Outbreak {
    fn name(&self) -> &'static str {
        "outbreak"
    }

    fn step(&self, ctx: &mut DayContext<'_>, day: &DailyRecord) -> SimResult<()> {
        let date = day.date;
        let immunity = ctx.config.immunity_days;

        ctx.affect(
            "deaths",
            day.new_deaths,
            |p| p.alive && p.infected,
            Person::with_dead,
        )?;
        ctx.affect(
            "cases",
            day.new_cases,
            |p| p.alive && !p.infected && !p.is_protected(date, immunity),
            Person::with_infected,
        )?;
        ctx.affect(
            "vaccinations",
            day.new_vaccinations,
            |p| p.alive && !p.infected && p.vaccinated.is_none(),
            |p| p.with_vaccinated(date),
        )?;
        Ok(())
    }

    fn report(&self, population: &BucketedPopulation<Person>, date: NaiveDate) -> DailyReport {
        DailyReport::new(date)
            .with("cases", population.count(|p| p.infected))
            .with("deaths", population.count(|p| !p.alive))
            .with("vaccinated", population.count(|p| p.vaccinated.is_some()))
            .with(
                "vaccinated_but_infected",
                population.count(|p| p.vaccinated.is_some() && p.infected),
            )
            .with(
                "vaccinated_but_died",
                population.count(|p| p.vaccinated.is_some() && !p.alive),
            )
    }
}

// ── Mortality ─────────────────────────────────────────────────────────────────

/// Reported vaccinations plus a constant background death toll
/// (`config.daily_deaths` per day, regardless of status).
///
/// Answers "how many people would die shortly after vaccination by chance
/// alone".  Reported cases and deaths are ignored.
#[derive(Copy, Clone, Debug, Default)]
pub struct Mortality;

impl Scenario for Mortality {
    fn name(&self) -> &'static str {
        "mortality"
    }

    fn step(&self, ctx: &mut DayContext<'_>, day: &DailyRecord) -> SimResult<()> {
        let date = day.date;

        ctx.affect(
            "vaccinations",
            day.new_vaccinations,
            |p| p.alive && p.vaccinated.is_none(),
            |p| p.with_vaccinated(date),
        )?;
        let deaths = ctx.config.daily_deaths;
        ctx.affect("deaths", deaths, |p| p.alive, |p| p.with_died(date))?;
        Ok(())
    }

    fn report(&self, population: &BucketedPopulation<Person>, date: NaiveDate) -> DailyReport {
        let week = TimeDelta::days(7);
        let day = TimeDelta::days(1);

        DailyReport::new(date)
            .with("deaths", population.count(|p| !p.alive))
            .with("vaccinated", population.count(|p| p.vaccinated.is_some()))
            .with(
                "vaccinated_and_died",
                population.count(|p| p.vaccinated.is_some() && !p.alive),
            )
            .with(
                "died_within_a_week_after_vaccination",
                population.count(|p| p.died_within(week)),
            )
            .with(
                "died_within_a_day_after_vaccination",
                population.count(|p| p.died_within(day)),
            )
    }
}

// ── ScenarioKind ──────────────────────────────────────────────────────────────

/// Name-level selection of a bundled scenario (CLI, config files).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ScenarioKind {
    #[default]
    Outbreak,
    Mortality,
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioKind::Outbreak => write!(f, "outbreak"),
            ScenarioKind::Mortality => write!(f, "mortality"),
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = PopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "outbreak" => Ok(ScenarioKind::Outbreak),
            "mortality" => Ok(ScenarioKind::Mortality),
            other => Err(PopError::Parse(format!(
                "invalid scenario {other:?}: expected \"outbreak\" or \"mortality\""
            ))),
        }
    }
}
