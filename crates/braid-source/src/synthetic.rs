use braid_types::Record;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::memory::MemorySource;

/// Default upper bound (inclusive) for generated timestamps.
const DEFAULT_MAX_TIMESTAMP: u64 = 100;

/// Seeded generator of synthetic record backlogs.
///
/// A test-harness collaborator: it produces backlogs for [`MemorySource`]s
/// and shares no state with the merge engine. The same seed always produces
/// the same backlogs, so failing runs are reproducible.
#[derive(Debug)]
pub struct SyntheticFeed {
    rng: StdRng,
    max_timestamp: u64,
    sorted: bool,
}

impl SyntheticFeed {
    /// Create a generator from a seed. Timestamps default to the range
    /// `0..=100`; backlogs default to unsorted.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            max_timestamp: DEFAULT_MAX_TIMESTAMP,
            sorted: false,
        }
    }

    /// Set the inclusive upper bound for generated timestamps.
    pub fn max_timestamp(mut self, max_timestamp: u64) -> Self {
        self.max_timestamp = max_timestamp;
        self
    }

    /// Sort each generated backlog ascending, modelling sources that are
    /// internally ordered.
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Generate one backlog of `len` records.
    pub fn backlog(&mut self, len: usize) -> Vec<Record> {
        let mut records: Vec<Record> = (0..len)
            .map(|_| Record::new(self.rng.gen_range(0..=self.max_timestamp)))
            .collect();
        if self.sorted {
            records.sort();
        }
        records
    }

    /// Generate `count` pre-fed sources of `len` records each.
    pub fn sources(&mut self, count: usize, len: usize) -> Vec<MemorySource> {
        debug!(count, len, sorted = self.sorted, "generating synthetic sources");
        (0..count)
            .map(|_| MemorySource::with_backlog(self.backlog(len)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::RecordSource;

    #[test]
    fn same_seed_same_backlogs() {
        let a = SyntheticFeed::new(42).backlog(10);
        let b = SyntheticFeed::new(42).backlog(10);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = SyntheticFeed::new(1).backlog(32);
        let b = SyntheticFeed::new(2).backlog(32);
        assert_ne!(a, b);
    }

    #[test]
    fn respects_max_timestamp() {
        let backlog = SyntheticFeed::new(7).max_timestamp(5).backlog(100);
        assert!(backlog.iter().all(|r| r.timestamp() <= 5));
    }

    #[test]
    fn sorted_backlogs_are_non_decreasing() {
        let backlog = SyntheticFeed::new(9).sorted(true).backlog(50);
        assert!(backlog.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn sources_are_independently_fed() {
        let mut sources = SyntheticFeed::new(3).sources(4, 2);
        assert_eq!(sources.len(), 4);
        for source in &mut sources {
            assert_eq!(source.remaining(), 2);
            assert!(source.pull().is_some());
            assert!(source.pull().is_some());
            assert_eq!(source.pull(), None);
        }
    }
}
