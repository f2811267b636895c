//! `pop-sim` — day-by-day driver for the bucketed population engine.
//!
//! # One simulated day
//!
//! ```text
//! for record in country.days:
//!   ① Step    — the scenario turns the day's deltas into `affect` calls
//!               (deaths, cases, vaccinations, …) on the population.
//!   ② Report  — the scenario reduces the population to named metrics via
//!               `count(predicate)` calls.
//!   ③ Observe — observers receive the report (writers, printers, …).
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`run_batch`] runs instances on Rayon's thread pool.   |
//! | `fx-hash`  | FxHash bucket index in the engine.                     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pop_core::SimConfig;
//! use pop_sim::{NoopObserver, Outbreak, SimBuilder};
//!
//! let data = pop_data::load_country_csv(path, "Poland")?;
//! let mut sim = SimBuilder::new(SimConfig::new(data.population, 42), Outbreak)
//!     .build()?;
//! sim.run(&data.days, &mut NoopObserver)?;
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod observer;
pub mod person;
pub mod report;
pub mod scenario;
pub mod sim;


pub use batch::{replicate, run_batch};
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, ReportCollector, SimObserver};
pub use person::Person;
pub use report::{DailyReport, Metric};
pub use scenario::{Mortality, Outbreak, Scenario, ScenarioKind};
pub use sim::{DayContext, Sim};
