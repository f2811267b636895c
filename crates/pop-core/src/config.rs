//! Run configuration.
//!
//! `SimConfig` is built by the application (CLI flags, optionally overlaid by
//! a JSON file with the `serde` feature) and handed to the simulation
//! builder, which calls [`SimConfig::validate`] before creating anything.

use std::fmt;
use std::str::FromStr;

use crate::{PopError, PopResult};

// ── SamplingMode ──────────────────────────────────────────────────────────────

/// How `affect` chooses which buckets lose entities.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SamplingMode {
    /// Per-entity draws weighted by the bucket sizes at the start of the
    /// call.  A draw landing in an already-exhausted bucket is redrawn, so
    /// counts never go negative.
    #[default]
    Snapshot,

    /// Per-entity draws weighted by the sizes remaining after earlier draws
    /// in the same call (true sampling without replacement).
    WithoutReplacement,

    /// Deterministic split proportional to each bucket's share.  No RNG.
    Proportional(Rounding),
}

/// What happens to the fractional shares of a proportional split.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rounding {
    /// Drop them.  Up to `buckets - 1` entities are left unmoved.
    Truncate,

    /// Give one extra entity to each of the buckets with the largest
    /// remainders (ties in bucket order) so exactly `size` entities move.
    #[default]
    LargestRemainder,
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingMode::Snapshot => write!(f, "snapshot"),
            SamplingMode::WithoutReplacement => write!(f, "exact"),
            SamplingMode::Proportional(Rounding::LargestRemainder) => write!(f, "proportional"),
            SamplingMode::Proportional(Rounding::Truncate) => write!(f, "proportional-truncate"),
        }
    }
}

impl FromStr for SamplingMode {
    type Err = PopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "snapshot" => Ok(SamplingMode::Snapshot),
            "exact" | "without-replacement" => Ok(SamplingMode::WithoutReplacement),
            "proportional" => Ok(SamplingMode::Proportional(Rounding::LargestRemainder)),
            "proportional-truncate" => Ok(SamplingMode::Proportional(Rounding::Truncate)),
            other => Err(PopError::Parse(format!(
                "invalid sampling mode {other:?}: expected \"snapshot\", \"exact\", \
                 \"proportional\", or \"proportional-truncate\""
            ))),
        }
    }
}

// ── ShortfallPolicy ───────────────────────────────────────────────────────────

/// What the driver does when input data asks for more entities than match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShortfallPolicy {
    /// Stop the run with an error naming the event and the date.
    #[default]
    Abort,

    /// Log a warning and move as many entities as are available.
    Clamp,
}

impl FromStr for ShortfallPolicy {
    type Err = PopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "abort" => Ok(ShortfallPolicy::Abort),
            "clamp" => Ok(ShortfallPolicy::Clamp),
            other => Err(PopError::Parse(format!(
                "invalid shortfall policy {other:?}: expected \"abort\" or \"clamp\""
            ))),
        }
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Days after vaccination before a person counts as protected.
pub const DEFAULT_IMMUNITY_DAYS: u32 = 14;

/// Deaths per day in the fixed-mortality scenario.
pub const DEFAULT_DAILY_DEATHS: u64 = 1_000;

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Initial population size.  Every entity starts with the default record.
    pub population: u64,

    /// Master RNG seed.  The same seed and the same input data always
    /// produce identical bucket trajectories.
    pub seed: u64,

    /// Sampling strategy used by every `affect` call of the run.
    pub sampling: SamplingMode,

    /// A vaccinated person is protected once strictly more than this many
    /// days have passed since vaccination.
    pub immunity_days: u32,

    /// Reaction to data asking for more entities than are eligible.
    pub shortfall: ShortfallPolicy,

    /// Deaths applied each day by the fixed-mortality scenario.
    pub daily_deaths: u64,
}

impl SimConfig {
    /// Configuration with default policies for a population of `population`.
    pub fn new(population: u64, seed: u64) -> Self {
        Self {
            population,
            seed,
            ..Self::default()
        }
    }

    /// Reject configurations that cannot describe a run.
    pub fn validate(&self) -> PopResult<()> {
        if self.population == 0 {
            return Err(PopError::Config("population must be positive".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population:    0,
            seed:          0,
            sampling:      SamplingMode::default(),
            immunity_days: DEFAULT_IMMUNITY_DAYS,
            shortfall:     ShortfallPolicy::default(),
            daily_deaths:  DEFAULT_DAILY_DEATHS,
        }
    }
}
