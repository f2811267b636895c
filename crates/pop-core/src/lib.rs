//! `pop-core` — foundational types for the `popsim` workspace.
//!
//! This crate is a dependency of every other `pop-*` crate.  It has no
//! `pop-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`record`]      | `FeatureRecord` — the bound every bucket key satisfies    |
//! | [`rng`]         | `SimRng` (seedable, explicit random source)               |
//! | [`config`]      | `SimConfig`, `SamplingMode`, `Rounding`, `ShortfallPolicy`|
//! | [`error`]       | `PopError`, `PopResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the configuration types. |

pub mod config;
pub mod error;
pub mod record;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Rounding, SamplingMode, ShortfallPolicy, SimConfig};
pub use error::{PopError, PopResult};
pub use record::FeatureRecord;
pub use rng::SimRng;
