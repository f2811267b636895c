//! Bucket selection strategies for `affect`.
//!
//! Every strategy works on the same input: the counts of the matching
//! buckets, in bucket order, as they stood when the `affect` call started.
//! It returns how many entities to take from each of those buckets.  The
//! population applies the result afterwards, so nothing here touches live
//! state.
//!
//! All strategies require `0 < size <= counts.iter().sum()`; the caller
//! checks this before dispatching.
//!
//! | Mode                    | Per-draw weight                  | Cost per draw   |
//! |-------------------------|----------------------------------|-----------------|
//! | `Snapshot`              | call-start counts                | O(log buckets)  |
//! | `WithoutReplacement`    | counts minus earlier draws       | O(buckets)      |
//! | `Proportional`          | — (no draws, no RNG)             | —               |

use pop_core::{Rounding, SamplingMode, SimRng};

/// Dispatch to the strategy selected by `mode`.
///
/// When `size` equals the matching total every matching entity is affected
/// and no RNG state is consumed.
pub fn select(mode: SamplingMode, counts: &[u64], size: u64, rng: &mut SimRng) -> Vec<u64> {
    let total: u64 = counts.iter().sum();
    if size == total {
        return counts.to_vec();
    }
    match mode {
        SamplingMode::Snapshot => snapshot(counts, size, rng),
        SamplingMode::WithoutReplacement => without_replacement(counts, size, rng),
        SamplingMode::Proportional(rounding) => proportional(counts, size, rounding),
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// `size` draws weighted by the call-start counts.
///
/// Each draw is a uniform position in `[0, total)` resolved to the first
/// bucket whose cumulative count exceeds it.  The cumulative table is built
/// once, so later draws do not see the depletion caused by earlier ones.
///
/// A draw that resolves to a bucket already fully taken is discarded and
/// drawn again.  This keeps every bucket at `taken <= count`; the cost is
/// that once a bucket is exhausted the remaining draws are still weighted by
/// the call-start shares of the others.  The bias is negligible while
/// `size` is small against `total`.
///
/// Redraws cost about `total / capacity_left` draws each, which blows up
/// when `size` is close to `total` and only small buckets have room left.
/// Once more than `size` draws have been rejected, the rest of the call is
/// finished by [`without_replacement`] over the capacity left.
pub fn snapshot(counts: &[u64], size: u64, rng: &mut SimRng) -> Vec<u64> {
    let cumulative: Vec<u64> = counts
        .iter()
        .scan(0u64, |acc, &c| {
            *acc += c;
            Some(*acc)
        })
        .collect();
    let total = cumulative.last().copied().unwrap_or(0);
    debug_assert!(size <= total, "snapshot sampling needs size <= total");

    let mut taken = vec![0u64; counts.len()];
    let mut drawn = 0u64;
    let mut rejected = 0u64;
    while drawn < size {
        if rejected > size {
            let left: Vec<u64> = counts.iter().zip(&taken).map(|(c, t)| c - t).collect();
            let rest = without_replacement(&left, size - drawn, rng);
            for (t, r) in taken.iter_mut().zip(rest) {
                *t += r;
            }
            break;
        }
        let slot = resolve_cumulative(&cumulative, rng.position(total));
        if taken[slot] == counts[slot] {
            rejected += 1;
            continue;
        }
        taken[slot] += 1;
        drawn += 1;
    }
    taken
}

/// Index of the first bucket whose cumulative count is greater than `pos`.
///
/// Zero-count buckets share their predecessor's cumulative value and can
/// never be selected.
#[inline]
pub fn resolve_cumulative(cumulative: &[u64], pos: u64) -> usize {
    cumulative.partition_point(|&c| c <= pos)
}

// ── WithoutReplacement ────────────────────────────────────────────────────────

/// `size` draws, each weighted by what is left after the previous draws.
///
/// Every still-unaffected matching entity is equally likely at every step,
/// i.e. a uniform sample of `size` distinct entities.
pub fn without_replacement(counts: &[u64], size: u64, rng: &mut SimRng) -> Vec<u64> {
    let mut remaining = counts.to_vec();
    let mut left: u64 = remaining.iter().sum();
    debug_assert!(size <= left, "sampling without replacement needs size <= total");
    let mut taken = vec![0u64; counts.len()];

    for _ in 0..size {
        let slot = resolve_linear(&remaining, rng.position(left));
        remaining[slot] -= 1;
        taken[slot] += 1;
        left -= 1;
    }
    taken
}

/// Linear cumulative scan over live counts.
fn resolve_linear(counts: &[u64], mut pos: u64) -> usize {
    for (slot, &c) in counts.iter().enumerate() {
        if pos < c {
            return slot;
        }
        pos -= c;
    }
    // Unreachable for pos < sum(counts); fall back to the last non-empty slot.
    counts.iter().rposition(|&c| c > 0).unwrap_or(0)
}

// ── Proportional ──────────────────────────────────────────────────────────────

/// Deterministic split of `size` in proportion to each bucket's share.
///
/// Shares are `floor(size * count / total)`.  With [`Rounding::Truncate`] the
/// fractional parts are dropped, so the result may sum to less than `size`
/// (by at most `buckets - 1`).  With [`Rounding::LargestRemainder`] the
/// shortfall is handed out one entity at a time to the buckets with the
/// largest remainders, earlier buckets winning ties, and the result sums to
/// exactly `size`.  A bucket never receives more than its count.
pub fn proportional(counts: &[u64], size: u64, rounding: Rounding) -> Vec<u64> {
    let total: u128 = counts.iter().map(|&c| c as u128).sum();
    if total == 0 {
        return vec![0; counts.len()];
    }

    let mut taken = Vec::with_capacity(counts.len());
    let mut remainders = Vec::with_capacity(counts.len());
    for (slot, &c) in counts.iter().enumerate() {
        let exact = size as u128 * c as u128;
        taken.push((exact / total) as u64);
        remainders.push((exact % total, slot));
    }

    if rounding == Rounding::LargestRemainder {
        let assigned: u64 = taken.iter().sum();
        let leftover = size.saturating_sub(assigned) as usize;
        // Stable sort keeps bucket order among equal remainders.
        remainders.sort_by(|a, b| b.0.cmp(&a.0));
        for &(_, slot) in remainders.iter().take(leftover) {
            taken[slot] += 1;
        }
    }
    taken
}
