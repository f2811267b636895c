//! Fluent builder for constructing a [`Sim`].

use pop_core::{SimConfig, SimRng};
use pop_engine::BucketedPopulation;

use crate::{Person, Scenario, Sim, SimResult};

/// Fluent builder for [`Sim<S>`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default               |
/// |-----------------|-----------------------|
/// | `.initial(p)`   | `Person::default()`   |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::new(38_000_000, 42), Outbreak)
///     .build()?;
/// ```
pub struct SimBuilder<S: Scenario> {
    config:   SimConfig,
    scenario: S,
    initial:  Option<Person>,
}

impl<S: Scenario> SimBuilder<S> {
    pub fn new(config: SimConfig, scenario: S) -> Self {
        Self { config, scenario, initial: None }
    }

    /// Record every person starts with.
    pub fn initial(mut self, person: Person) -> Self {
        self.initial = Some(person);
        self
    }

    /// Validate the configuration and create the population.
    pub fn build(self) -> SimResult<Sim<S>> {
        self.config.validate()?;

        let population = BucketedPopulation::new(
            self.config.population,
            self.initial.unwrap_or_default(),
            SimRng::new(self.config.seed),
        )
        .with_sampling(self.config.sampling);

        Ok(Sim {
            config: self.config,
            population,
            scenario: self.scenario,
            days_run: 0,
        })
    }
}
