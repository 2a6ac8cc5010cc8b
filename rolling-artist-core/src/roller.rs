//! The single entry point: partition, sample, distribute, format.
//!
//! [`roll`] is the pure form and rebuilds the partition on every call.
//! [`ArtistRoller`] owns the reference list and caches the partition for the
//! last ratio it saw; the cache is guarded by one mutex held across
//! update-then-sample so concurrent callers never observe a half-swapped
//! partition.

use std::fmt;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RollerConfig;
use crate::format::{format_items, WeightedItem};
use crate::partition::Partition;
use crate::reference::ReferenceList;
use crate::request::{RollError, RollRequest};
use crate::rng::rng_for_seed;
use crate::sampler::sample;
use crate::weights::{distribute, WeightBounds};

/// Prefix applied when a request asks for one.
pub const DEFAULT_PREFIX: &str = "artist:";

/// Outcome of one roll. `Display` renders the prompt fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Roll {
    pub seed: u64,
    pub prefix: String,
    pub items: Vec<WeightedItem>,
}

impl Roll {
    fn empty(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn to_prompt(&self) -> String {
        format_items(&self.items, &self.prefix)
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_prompt())
    }
}

/// Roll against a freshly built partition.
pub fn roll(
    reference: &ReferenceList,
    request: &RollRequest,
    prefix: &str,
) -> Result<Roll, RollError> {
    let bounds = request.validate()?;
    if request.total_count == 0 || reference.is_empty() {
        return Ok(Roll::empty(request.seed));
    }
    let partition = Partition::new(reference.names(), request.top_ratio);
    Ok(roll_partition(&partition, request, &bounds, prefix))
}

fn roll_partition(
    partition: &Partition,
    request: &RollRequest,
    bounds: &WeightBounds,
    prefix: &str,
) -> Roll {
    let mut rng = rng_for_seed(request.seed);
    let names = sample(partition, request.total_count, request.top_count, &mut rng);
    let weights = distribute(names.len(), bounds, &mut rng);

    debug!(
        seed = request.seed,
        selected = names.len(),
        top = names.iter().filter(|n| partition.is_top(n)).count(),
        ratio = partition.ratio(),
        "rolled"
    );

    Roll {
        seed: request.seed,
        prefix: if request.use_prefix {
            prefix.to_string()
        } else {
            String::new()
        },
        items: names
            .into_iter()
            .zip(weights)
            .map(|(name, weight)| WeightedItem::new(name, weight))
            .collect(),
    }
}

/// Long-lived roller over one reference list.
#[derive(Debug)]
pub struct ArtistRoller {
    reference: ReferenceList,
    prefix: String,
    partition: Mutex<Partition>,
}

impl ArtistRoller {
    /// Build a roller, pre-computing the partition for the default ratio.
    pub fn new(reference: ReferenceList, prefix: impl Into<String>) -> Self {
        let partition = Partition::new(reference.names(), RollRequest::default().top_ratio);
        Self {
            reference,
            prefix: prefix.into(),
            partition: Mutex::new(partition),
        }
    }

    /// Build a roller from config, loading the reference list.
    ///
    /// A missing or unreadable reference resource yields a roller over an
    /// empty list.
    pub fn from_config(config: &RollerConfig) -> Self {
        let reference = ReferenceList::load_or_empty(&config.reference);
        Self::new(reference, config.prefix.clone())
    }

    pub fn reference(&self) -> &ReferenceList {
        &self.reference
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Roll, re-partitioning first if the ratio changed since the last call.
    pub fn roll(&self, request: &RollRequest) -> Result<Roll, RollError> {
        let bounds = request.validate()?;
        if request.total_count == 0 || self.reference.is_empty() {
            return Ok(Roll::empty(request.seed));
        }

        let partition = self.partition_for(request.top_ratio);
        Ok(roll_partition(&partition, request, &bounds, &self.prefix))
    }

    /// Host-facing form: the prompt string, or `""` when the request is
    /// rejected.
    pub fn prompt(&self, request: &RollRequest) -> String {
        match self.roll(request) {
            Ok(roll) => roll.to_prompt(),
            Err(e) => {
                warn!(error = %e, "roll request rejected");
                String::new()
            }
        }
    }

    /// Snapshot of the partition for `ratio`, updating the cache.
    pub fn partition(&self, ratio: f64) -> Partition {
        self.partition_for(ratio).clone()
    }

    fn partition_for(&self, ratio: f64) -> MutexGuard<'_, Partition> {
        let mut guard = self.lock_partition();
        if guard.ratio() != ratio {
            *guard = Partition::new(self.reference.names(), ratio);
        }
        guard
    }

    // The cache is derived from the immutable list; a poisoned guard still
    // holds a complete partition.
    fn lock_partition(&self) -> MutexGuard<'_, Partition> {
        self.partition
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(n: usize) -> ReferenceList {
        ReferenceList::from_names((0..n).map(|i| format!("artist_{i}")))
    }

    #[test]
    fn roller_matches_pure_roll() {
        let roller = ArtistRoller::new(reference(200), DEFAULT_PREFIX);
        for seed in 0..20 {
            let req = RollRequest::default().with_seed(seed);
            let a = roller.roll(&req).unwrap();
            let b = roll(roller.reference(), &req, DEFAULT_PREFIX).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn prompt_shape() {
        let roller = ArtistRoller::new(reference(50), DEFAULT_PREFIX);
        let prompt = roller.prompt(&RollRequest::default());
        let tags: Vec<&str> = prompt.split("),(").collect();
        assert_eq!(tags.len(), 5);
        assert!(prompt.starts_with("(artist:artist_"));
        assert!(prompt.ends_with(')'));
    }

    #[test]
    fn no_prefix_when_disabled() {
        let roller = ArtistRoller::new(reference(50), DEFAULT_PREFIX);
        let req = RollRequest {
            use_prefix: false,
            ..RollRequest::default()
        };
        let prompt = roller.prompt(&req);
        assert!(!prompt.contains("artist:"));
        assert!(prompt.starts_with("(artist_"));
    }

    #[test]
    fn empty_reference_gives_empty_prompt() {
        let roller = ArtistRoller::new(ReferenceList::default(), DEFAULT_PREFIX);
        for seed in 0..10 {
            assert_eq!(roller.prompt(&RollRequest::default().with_seed(seed)), "");
        }
    }

    #[test]
    fn zero_count_gives_empty_prompt() {
        let roller = ArtistRoller::new(reference(50), DEFAULT_PREFIX);
        let req = RollRequest {
            total_count: 0,
            ..RollRequest::default()
        };
        assert_eq!(roller.prompt(&req), "");
        assert!(roller.roll(&req).unwrap().is_empty());
    }

    #[test]
    fn rejected_request_gives_empty_prompt() {
        let roller = ArtistRoller::new(reference(50), DEFAULT_PREFIX);
        let req = RollRequest {
            weight_min: 2.0,
            weight_max: 1.0,
            ..RollRequest::default()
        };
        assert!(roller.roll(&req).is_err());
        assert_eq!(roller.prompt(&req), "");
    }

    #[test]
    fn partition_cache_follows_ratio() {
        let roller = ArtistRoller::new(reference(100), DEFAULT_PREFIX);
        assert_eq!(roller.partition(0.2).top().len(), 20);
        assert_eq!(roller.partition(0.5).top().len(), 50);
        assert_eq!(roller.partition(0.2).top().len(), 20);
    }

    #[test]
    fn roll_records_seed_and_prefix() {
        let roller = ArtistRoller::new(reference(30), "by ");
        let roll = roller.roll(&RollRequest::default().with_seed(77)).unwrap();
        assert_eq!(roll.seed, 77);
        assert_eq!(roll.prefix, roller.prefix());
        assert_eq!(roll.len(), 5);
        assert_eq!(roll.to_string(), roll.to_prompt());
    }

    #[test]
    fn prefix_is_dropped_per_request() {
        let roller = ArtistRoller::new(reference(30), "by ");
        assert_eq!(roller.prefix(), "by ");
        let req = RollRequest {
            use_prefix: false,
            ..RollRequest::default()
        };
        assert_eq!(roller.roll(&req).unwrap().prefix, "");
        assert_eq!(roller.prefix(), "by ");
    }

    #[test]
    fn weights_sum_to_total() {
        let roller = ArtistRoller::new(reference(100), DEFAULT_PREFIX);
        let roll = roller.roll(&RollRequest::default()).unwrap();
        let sum: i64 = roll.items.iter().map(|i| i.weight.tenths()).sum();
        assert_eq!(sum, 30);
    }

    #[test]
    fn roller_is_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}
        require_send::<ArtistRoller>();
        require_sync::<ArtistRoller>();
    }
}
