//! `BucketedPopulation` — counts keyed by feature record.
//!
//! # Layout
//!
//! Buckets live in an insertion-ordered `Vec<(R, u64)>`.  A hash index maps
//! each record to its slot so `affect` can find (or create) the destination
//! bucket in O(1).  All scans — `count`, `iter`, and the matching snapshot
//! taken by `affect` — walk the vector, never the hash map, so the order in
//! which buckets are visited depends only on the history of the population
//! and a seeded run is reproducible regardless of the hasher.
//!
//! Buckets whose count drops to zero stay in place until [`prune`] is
//! called.  They match no draw and contribute nothing to any count.
//!
//! [`prune`]: BucketedPopulation::prune

use std::iter;

use log::debug;

use pop_core::{FeatureRecord, SamplingMode, SimRng};

use crate::sampling;
use crate::{EngineError, EngineResult};

#[cfg(feature = "fx-hash")]
type BucketIndex<R> = rustc_hash::FxHashMap<R, usize>;

#[cfg(not(feature = "fx-hash"))]
type BucketIndex<R> = std::collections::HashMap<R, usize>;

/// A population of fungible entities grouped by feature record.
///
/// # Invariants
///
/// - The sum of all bucket counts equals the size passed at construction.
///   `affect` pairs every removal with an insertion.
/// - No bucket count is ever negative: counts are `u64`, and every sampling
///   mode takes at most a bucket's call-start count from it.
#[derive(Clone, Debug)]
pub struct BucketedPopulation<R: FeatureRecord> {
    buckets:  Vec<(R, u64)>,
    index:    BucketIndex<R>,
    sampling: SamplingMode,
    rng:      SimRng,
}

impl<R: FeatureRecord> BucketedPopulation<R> {
    // ── Construction ──────────────────────────────────────────────────────

    /// `size` entities, all described by `initial`.
    pub fn new(size: u64, initial: R, rng: SimRng) -> Self {
        let mut index = BucketIndex::default();
        index.insert(initial.clone(), 0);
        Self {
            buckets: vec![(initial, size)],
            index,
            sampling: SamplingMode::default(),
            rng,
        }
    }

    /// Like [`new`](Self::new) for sizes read from untyped sources.
    ///
    /// Returns [`EngineError::InvalidConfiguration`] if `size` is negative.
    pub fn from_signed(size: i64, initial: R, rng: SimRng) -> EngineResult<Self> {
        let size = u64::try_from(size).map_err(|_| {
            EngineError::InvalidConfiguration(format!(
                "population size must be non-negative, got {size}"
            ))
        })?;
        Ok(Self::new(size, initial, rng))
    }

    /// Select the sampling strategy used by subsequent `affect` calls.
    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    #[inline]
    pub fn sampling(&self) -> SamplingMode {
        self.sampling
    }

    // ── Read-only queries ─────────────────────────────────────────────────

    /// Total number of entities.  Constant for the life of the population.
    pub fn len(&self) -> u64 {
        self.buckets.iter().map(|(_, c)| c).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entities whose record satisfies `predicate`.
    pub fn count<P>(&self, predicate: P) -> u64
    where
        P: Fn(&R) -> bool,
    {
        self.buckets
            .iter()
            .filter(|(record, _)| predicate(record))
            .map(|(_, c)| c)
            .sum()
    }

    /// One record per entity, bucket by bucket.
    ///
    /// O(population).  Intended for tests and small populations; use
    /// [`count`](Self::count) for anything the size of a country.
    pub fn iter(&self) -> impl Iterator<Item = R> + '_ {
        self.buckets
            .iter()
            .flat_map(|(record, c)| iter::repeat_n(record.clone(), *c as usize))
    }

    /// `(record, count)` for every bucket in bucket order, including empty ones.
    pub fn buckets(&self) -> impl Iterator<Item = (&R, u64)> + '_ {
        self.buckets.iter().map(|(record, c)| (record, *c))
    }

    /// Count of the bucket for exactly `record` (0 if it has never existed).
    pub fn bucket_count(&self, record: &R) -> u64 {
        self.index.get(record).map_or(0, |&slot| self.buckets[slot].1)
    }

    /// Number of distinct buckets, including empty ones.
    pub fn distinct(&self) -> usize {
        self.buckets.len()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Move `size` entities matching `predicate` to `transform(record)`.
    ///
    /// Which matching buckets lose entities is decided by the population's
    /// [`SamplingMode`], always against the bucket sizes as they stood when
    /// the call began.  Returns the number of entities moved: `size`, except
    /// under proportional truncation, which may move fewer.
    ///
    /// `transform` is called once per affected bucket.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NoMatchingEntities`] if `size > 0` and nothing matches.
    /// - [`EngineError::InsufficientPopulation`] if `size` exceeds the number
    ///   of matching entities.
    ///
    /// On error the population is unchanged.
    pub fn affect<P, T>(&mut self, size: u64, predicate: P, transform: T) -> EngineResult<u64>
    where
        P: Fn(&R) -> bool,
        T: Fn(&R) -> R,
    {
        if size == 0 {
            return Ok(0);
        }

        // ── Snapshot of the matching sub-population ───────────────────────
        let (slots, counts): (Vec<usize>, Vec<u64>) = self
            .buckets
            .iter()
            .enumerate()
            .filter(|(_, (record, c))| *c > 0 && predicate(record))
            .map(|(slot, (_, c))| (slot, *c))
            .unzip();
        let matching: u64 = counts.iter().sum();

        if matching == 0 {
            return Err(EngineError::NoMatchingEntities { requested: size });
        }
        if size > matching {
            return Err(EngineError::InsufficientPopulation {
                requested: size,
                available: matching,
            });
        }

        // ── Decide how many leave each bucket (no live writes yet) ────────
        let taken = sampling::select(self.sampling, &counts, size, &mut self.rng);

        // ── Apply ─────────────────────────────────────────────────────────
        let mut moved = 0u64;
        for (&slot, &n) in slots.iter().zip(&taken) {
            if n == 0 {
                continue;
            }
            let record = self.buckets[slot].0.clone();
            self.buckets[slot].1 -= n;
            let target = self.slot_for(transform(&record));
            self.buckets[target].1 += n;
            moved += n;
        }

        debug!(
            "affect: moved {moved}/{size} requested from {matching} matching across {} buckets ({})",
            slots.len(),
            self.sampling,
        );
        Ok(moved)
    }

    /// Drop empty buckets.  Has no effect on any count.
    pub fn prune(&mut self) {
        self.buckets.retain(|(_, c)| *c > 0);
        self.index.clear();
        for (slot, (record, _)) in self.buckets.iter().enumerate() {
            self.index.insert(record.clone(), slot);
        }
    }

    // ── Internal ──────────────────────────────────────────────────────────

    /// Slot of `record`'s bucket, appending an empty bucket if it is new.
    fn slot_for(&mut self, record: R) -> usize {
        if let Some(&slot) = self.index.get(&record) {
            return slot;
        }
        let slot = self.buckets.len();
        self.index.insert(record.clone(), slot);
        self.buckets.push((record, 0));
        slot
    }
}
