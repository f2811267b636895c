//! `pop-engine` — the bucketed population engine.
//!
//! A population of millions is stored as a handful of `(record, count)`
//! buckets: every entity sharing the same feature record is one unit of the
//! same count.  Entities are fungible inside a bucket; there is no
//! per-entity identity.
//!
//! ```text
//!   {alive, healthy, unvaccinated} : 37 812 004
//!   {alive, healthy, vaccinated@D} :    150 231
//!   {alive, infected}              :     36 912
//!   {dead}                         :        853
//! ```
//!
//! # Operations
//!
//! | Method                                   | Cost                  |
//! |------------------------------------------|-----------------------|
//! | [`BucketedPopulation::count`]            | O(buckets)            |
//! | [`BucketedPopulation::len`]              | O(buckets)            |
//! | [`BucketedPopulation::affect`]           | O(buckets + size·log buckets) in the default mode |
//! | [`BucketedPopulation::iter`]             | O(population) — inspection/tests only |
//!
//! `affect` is atomic: it either moves exactly the entities it reports or
//! returns an error before touching any count.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Uses FxHash for the record → bucket index.              |

pub mod error;
pub mod population;
pub mod sampling;


pub use error::{EngineError, EngineResult};
pub use population::BucketedPopulation;
pub use pop_core::{FeatureRecord, Rounding, SamplingMode, SimRng};
