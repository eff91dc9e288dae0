//! The round-based merge driver.
//!
//! Each round pulls at most one record from every source, in a fixed
//! iteration order, then inserts the pulled batch in that same order. A
//! round that pulls nothing means every source is exhausted, and that is
//! the sole termination condition: a non-terminating round consumes at
//! least one record, so the round count is bounded by the longest source.

use serde::{Deserialize, Serialize};
use tracing::debug;

use braid_source::RecordSource;
use braid_types::Record;

use crate::insert::{AdaptiveInserter, InsertPath};
use crate::sequence::SortedSequence;

/// Counters describing a finished merge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Rounds that pulled at least one record.
    pub rounds: u64,
    /// Total records merged.
    pub records: u64,
    /// Insertions that took the O(1) append path.
    pub appends: u64,
    /// Insertions resolved inside the bounded tail window.
    pub window_searches: u64,
    /// Insertions that fell back to searching the whole sequence.
    pub full_searches: u64,
    /// Final value of the tail-distance heuristic.
    pub max_distance: u64,
}

impl MergeStats {
    fn count(&mut self, path: InsertPath) {
        self.records += 1;
        match path {
            InsertPath::Append => self.appends += 1,
            InsertPath::Window => self.window_searches += 1,
            InsertPath::Full => self.full_searches += 1,
        }
    }
}

/// A finished merge: the globally ordered sequence plus its statistics.
#[derive(Debug)]
pub struct MergeResult {
    pub sequence: SortedSequence,
    pub stats: MergeStats,
}

/// The round-based driver merging a fixed set of sources.
///
/// Single-threaded and synchronous: pulls, searches, and insertions all run
/// to completion in the calling thread. The source list is fixed for the
/// engine's lifetime; its iteration order decides which of several
/// equal-timestamp records pulled in one round is inserted first.
pub struct MergeEngine {
    sources: Vec<Box<dyn RecordSource>>,
    sequence: SortedSequence,
    inserter: AdaptiveInserter,
}

impl std::fmt::Debug for MergeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MergeEngine")
            .field("sources", &self.sources.len())
            .field("merged", &self.sequence.len())
            .field("inserter", &self.inserter)
            .finish()
    }
}

impl MergeEngine {
    /// Create an engine over the given sources. Iteration order is the
    /// order of this list.
    pub fn new(sources: Vec<Box<dyn RecordSource>>) -> Self {
        Self {
            sources,
            sequence: SortedSequence::new(),
            inserter: AdaptiveInserter::new(),
        }
    }

    /// Create an engine with the output container pre-sized for the total
    /// record count, avoiding reallocation during the merge.
    pub fn with_expected_records(sources: Vec<Box<dyn RecordSource>>, expected: usize) -> Self {
        Self {
            sources,
            sequence: SortedSequence::with_capacity(expected),
            inserter: AdaptiveInserter::new(),
        }
    }

    /// Run rounds until every source is exhausted and return the merged
    /// sequence with its statistics.
    pub fn run(mut self) -> MergeResult {
        let mut stats = MergeStats::default();
        let mut batch: Vec<Record> = Vec::with_capacity(self.sources.len());

        loop {
            for source in &mut self.sources {
                if let Some(record) = source.pull() {
                    batch.push(record);
                }
            }
            if batch.is_empty() {
                break;
            }

            stats.rounds += 1;
            let pulled = batch.len();
            for record in batch.drain(..) {
                let path = self.inserter.insert(&mut self.sequence, record);
                stats.count(path);
            }
            debug!(
                round = stats.rounds,
                pulled,
                merged = self.sequence.len(),
                "round complete"
            );
        }

        stats.max_distance = self.inserter.max_distance() as u64;
        debug!(
            rounds = stats.rounds,
            records = stats.records,
            appends = stats.appends,
            window_searches = stats.window_searches,
            full_searches = stats.full_searches,
            "merge complete"
        );
        MergeResult {
            sequence: self.sequence,
            stats,
        }
    }
}
