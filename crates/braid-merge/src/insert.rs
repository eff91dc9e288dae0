//! The adaptive insertion policy.
//!
//! Insertion chooses among three paths, cheapest first:
//!
//! 1. **Append** — the record sorts at or after the current tail; push it.
//! 2. **Window** — upper-bound search confined to the last `max_distance`
//!   elements, taken only when the window provably contains the insertion
//!   point.
//! 3. **Full** — upper-bound search over the whole sequence.
//!
//! `max_distance` is the largest tail distance any insertion has needed so
//! far; it only grows, so the window adapts to the worst skew observed
//! between sources.

use serde::{Deserialize, Serialize};
use tracing::trace;

use braid_types::Record;

use crate::sequence::SortedSequence;

/// Which path an insertion took. Reported for statistics and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsertPath {
    /// O(1) append at the tail.
    Append,
    /// Bounded upper-bound search over the tail window.
    Window,
    /// Upper-bound search over the entire sequence.
    Full,
}

impl std::fmt::Display for InsertPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Append => write!(f, "Append"),
            Self::Window => write!(f, "Window"),
            Self::Full => write!(f, "Full"),
        }
    }
}

/// Sorted insertion with a tail-biased search heuristic.
///
/// Ties are broken one fixed way on every path: a record with a timestamp
/// equal to existing records is placed *after* them (upper-bound search in
/// both the window and full branches).
///
/// The window gate is a containment check, not a cost guess: the bounded
/// branch is taken iff the record sorts at or after the window's first
/// element. Every element before the window is then `<=` the record, so
/// the upper bound found inside the window is the global one. When the
/// gate fails the full branch finds the same kind of bound over the whole
/// range. Sortedness therefore holds whichever branch runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveInserter {
    max_distance: usize,
}

impl AdaptiveInserter {
    /// Create the inserter with the smallest useful window, one element.
    pub fn new() -> Self {
        Self { max_distance: 1 }
    }

    /// Largest distance from the tail any insertion has required so far.
    /// Monotonically non-decreasing over the inserter's lifetime.
    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Insert `record` into `sequence`, keeping it sorted, and report which
    /// path was taken.
    pub fn insert(&mut self, sequence: &mut SortedSequence, record: Record) -> InsertPath {
        let ts = record.timestamp();

        // Sources are individually non-decreasing and interleave with mild
        // skew, so most records sort at or after the current tail.
        let belongs_at_tail = match sequence.last() {
            None => true,
            Some(last) => ts >= last.timestamp(),
        };
        if belongs_at_tail {
            sequence.push(record);
            trace!(timestamp = ts, path = %InsertPath::Append, "inserted record");
            return InsertPath::Append;
        }

        let len = sequence.len();
        // max_distance can exceed len right after an early long-distance
        // insertion; clamp so the window start cannot underflow.
        let window = self.max_distance.min(len);
        let start = len - window;

        let (path, index) = if ts >= sequence.as_slice()[start].timestamp() {
            (InsertPath::Window, sequence.upper_bound_from(start, ts))
        } else {
            (InsertPath::Full, sequence.upper_bound_from(0, ts))
        };
        sequence.insert_at(index, record);

        // Tail distance of the new element, post-insert. The append path
        // skips this: its distance is always 1, the starting value.
        let distance = sequence.len() - index;
        self.max_distance = self.max_distance.max(distance);
        trace!(
            timestamp = ts,
            path = %path,
            index,
            max_distance = self.max_distance,
            "inserted record"
        );
        path
    }
}

impl Default for AdaptiveInserter {
    fn default() -> Self {
        Self::new()
    }
}
