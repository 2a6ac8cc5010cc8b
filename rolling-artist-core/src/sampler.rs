//! Quota-based stratified sampler.
//!
//! Draws a fixed quota from the top side, fills the rest of the request from
//! the non-top side, then shuffles the combined sequence. All three steps pull
//! from the same generator in that order, so a seed fully determines the
//! result.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::partition::Partition;

/// How many items each side of the partition will contribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub top: usize,
    pub non_top: usize,
}

impl Quota {
    /// Resolve a request against the sizes actually available.
    ///
    /// The top quota is capped by the request size and the top side; the
    /// remainder comes from the non-top side and is capped by its size.
    pub fn resolve(partition: &Partition, total_count: usize, top_count: usize) -> Self {
        let top = top_count.min(total_count).min(partition.top().len());
        let non_top = total_count
            .saturating_sub(top)
            .min(partition.non_top().len());
        Self { top, non_top }
    }

    pub fn total(&self) -> usize {
        self.top + self.non_top
    }
}

/// Select up to `total_count` distinct names, `top_count` of them from the
/// top side when available, in a seed-shuffled order.
///
/// Never repeats an entry and never errors: short pools just yield fewer
/// names.
pub fn sample<'a, R: Rng>(
    partition: &'a Partition,
    total_count: usize,
    top_count: usize,
    rng: &mut R,
) -> Vec<&'a str> {
    if total_count == 0 || partition.is_empty() {
        return Vec::new();
    }

    let quota = Quota::resolve(partition, total_count, top_count);

    let mut picked: Vec<&str> = Vec::with_capacity(quota.total());
    picked.extend(
        partition
            .top()
            .choose_multiple(rng, quota.top)
            .map(String::as_str),
    );
    picked.extend(
        partition
            .non_top()
            .choose_multiple(rng, quota.non_top)
            .map(String::as_str),
    );
    picked.shuffle(rng);
    picked
}
