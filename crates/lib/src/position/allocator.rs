use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::PositionKey;
use crate::constants::{FIRST_KEY, HEAD_BOUND, KMAX, TAIL_BOUND};

/// No integer key exists strictly between the two bounds.
///
/// This is a control signal for the reconciler, which answers it with a full
/// rebalance. It never reaches callers of `set_order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no position key fits between {low} and {high}")]
pub struct NoGap {
    /// Effective exclusive lower bound
    pub low: PositionKey,
    /// Effective exclusive upper bound
    pub high: PositionKey,
}

/// Hands out position keys inside gaps and computes full rebalances.
///
/// Keys are drawn uniformly at random from the open gap rather than at its
/// midpoint. Repeated insertion at one boundary would otherwise halve the same
/// gap on every call.
///
/// The random source is injectable so tests can reproduce a run exactly:
///
/// ```
/// use reorder::position::KeyAllocator;
///
/// let mut a = KeyAllocator::seeded(42);
/// let mut b = KeyAllocator::seeded(42);
/// assert_eq!(
///     a.allocate_between(None, Some(0)).unwrap(),
///     b.allocate_between(None, Some(0)).unwrap(),
/// );
/// ```
pub struct KeyAllocator<R = StdRng> {
    rng: R,
}

impl KeyAllocator<StdRng> {
    /// Creates an allocator backed by an entropy-seeded [`StdRng`].
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates an allocator with a reproducible sequence of choices.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for KeyAllocator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> KeyAllocator<R> {
    /// Creates an allocator drawing from the given random source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Returns a key strictly between `low` and `high`.
    ///
    /// A missing `low` stands for [`HEAD_BOUND`] and a missing `high` for
    /// [`TAIL_BOUND`], both exclusive. The outer quarters of the key space stay
    /// free for later head and tail insertions.
    ///
    /// # Errors
    /// Returns [`NoGap`] when `high - low <= 1`, including inverted bounds.
    pub fn allocate_between(
        &mut self,
        low: Option<PositionKey>,
        high: Option<PositionKey>,
    ) -> Result<PositionKey, NoGap> {
        let low = low.unwrap_or(HEAD_BOUND);
        let high = high.unwrap_or(TAIL_BOUND);

        // i128 so that a full-width gap cannot overflow
        if i128::from(high) - i128::from(low) <= 1 {
            tracing::debug!(low, high, "No gap left between position keys");
            return Err(NoGap { low, high });
        }

        let key = self.rng.gen_range(low + 1..high);
        tracing::trace!(low, high, key, "Allocated position key");
        Ok(key)
    }

    /// Produces `count` strictly increasing keys for a fresh assignment.
    ///
    /// Keys start at [`HEAD_BOUND`] and are spaced `KMAX / (count - 1)` apart,
    /// ending close to [`TAIL_BOUND`]. A single element gets key `0`.
    ///
    /// # Panics
    /// Panics if `count - 1` exceeds `KMAX`, where no spacing of at least one
    /// fits between the bounds.
    pub fn rebalance_all(&self, count: usize) -> Vec<PositionKey> {
        match count {
            0 => Vec::new(),
            1 => vec![FIRST_KEY],
            _ => {
                let portion = KMAX / Self::last_index(count);
                (0..count)
                    .map(|index| HEAD_BOUND + portion * index as PositionKey)
                    .collect()
            }
        }
    }

    fn last_index(count: usize) -> PositionKey {
        match PositionKey::try_from(count - 1) {
            Ok(last) => last,
            Err(_) => panic!("cannot rebalance {count} keys, the key space holds at most {KMAX}"),
        }
    }
}

impl<R> fmt::Debug for KeyAllocator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyAllocator").finish_non_exhaustive()
    }
}
