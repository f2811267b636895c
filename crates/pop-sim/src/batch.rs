//! Independent replicate runs.
//!
//! Each run builds its own [`Sim`][crate::Sim] (own population, own RNG), so
//! runs share nothing and can execute in any order or in parallel without
//! changing their results.

use pop_core::{SimConfig, SimRng};
use pop_data::DailyRecord;

use crate::{DailyReport, ReportCollector, Scenario, SimBuilder, SimResult};

/// `n` copies of `base` with distinct seeds derived from `base.seed`.
pub fn replicate(base: &SimConfig, n: usize) -> Vec<SimConfig> {
    let mut root = SimRng::new(base.seed);
    (0..n as u64)
        .map(|i| SimConfig {
            seed: root.child(i).random(),
            ..base.clone()
        })
        .collect()
}

/// Run `scenario` over `days` once per config.
///
/// Results are returned in config order.  With the `parallel` feature the
/// runs are spread over Rayon's thread pool.
pub fn run_batch<S>(
    configs:  &[SimConfig],
    days:     &[DailyRecord],
    scenario: &S,
) -> Vec<SimResult<Vec<DailyReport>>>
where
    S: Scenario + Clone,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        configs
            .par_iter()
            .map(|config| run_one(config, days, scenario))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        configs
            .iter()
            .map(|config| run_one(config, days, scenario))
            .collect()
    }
}

fn run_one<S: Scenario + Clone>(
    config:   &SimConfig,
    days:     &[DailyRecord],
    scenario: &S,
) -> SimResult<Vec<DailyReport>> {
    let mut sim = SimBuilder::new(config.clone(), scenario.clone()).build()?;
    let mut collector = ReportCollector::default();
    sim.run(days, &mut collector)?;
    Ok(collector.reports)
}
