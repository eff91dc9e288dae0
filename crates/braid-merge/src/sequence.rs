//! The growable contiguous container holding the merged output.
//!
//! # Invariants
//!
//! - The sequence is non-decreasing by timestamp from index 0 to the last
//!   index after every insertion.
//! - Insertion is index-based and the index is computed fresh for every
//!   call; no position is ever retained across a mutation, since any
//!   insertion may relocate storage.

use serde::{Deserialize, Serialize};

use braid_types::Record;

/// The merged, globally ordered output sequence.
///
/// Mutation goes through [`AdaptiveInserter`], which computes the insertion
/// index; the raw `push`/`insert_at` operations are crate-private so
/// external callers cannot break the ordering invariant. Consumers read the
/// finished sequence through [`iter`], [`as_slice`], or [`timestamps`].
///
/// [`AdaptiveInserter`]: crate::insert::AdaptiveInserter
/// [`iter`]: SortedSequence::iter
/// [`as_slice`]: SortedSequence::as_slice
/// [`timestamps`]: SortedSequence::timestamps
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortedSequence {
    records: Vec<Record>,
}

impl SortedSequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sequence with room for `capacity` records, to avoid
    /// reallocation when the total record count is known up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Number of merged records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been merged yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record currently at the tail, if any.
    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Read-only view of the merged records.
    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Restartable traversal of the merged records in timestamp order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// The merged timestamps in order. Convenience for consumers and tests.
    pub fn timestamps(&self) -> Vec<u64> {
        self.records.iter().map(Record::timestamp).collect()
    }

    /// Consume the sequence, yielding the merged records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Append at the tail. Caller guarantees `record` sorts at or after the
    /// current last element.
    pub(crate) fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Insert at `index`, shifting everything from `index` onward right by
    /// one. Caller guarantees the index keeps the sequence sorted.
    pub(crate) fn insert_at(&mut self, index: usize, record: Record) {
        self.records.insert(index, record);
    }

    /// First index in `[start, len)` whose timestamp is strictly greater
    /// than `timestamp`, or `len` if none is. An upper-bound search:
    /// inserting at the returned index places the new record after any
    /// existing records with an equal timestamp.
    pub(crate) fn upper_bound_from(&self, start: usize, timestamp: u64) -> usize {
        start + self.records[start..].partition_point(|r| r.timestamp() <= timestamp)
    }
}

impl<'a> IntoIterator for &'a SortedSequence {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
