//! The bound shared by every bucket key.
//!
//! A feature record is a small immutable value describing one class of
//! entity (`{alive, infected, vaccinated_on}` and the like).  Two records are
//! the same bucket iff they compare equal, so equality and hashing must be
//! structural over every field — `#[derive(PartialEq, Eq, Hash)]` gives
//! exactly that.
//!
//! Records are never mutated in place: transforms take `&R` and return a new
//! `R`, typically via `with_*` copy constructors on the record type.

use std::fmt::Debug;
use std::hash::Hash;

/// Marker trait for types usable as bucket keys.
///
/// Blanket-implemented for every `Clone + Eq + Hash + Debug` type; it exists
/// to give the bound a name in signatures.
pub trait FeatureRecord: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> FeatureRecord for T {}
