use braid_types::Record;
use tracing::trace;

use crate::traits::RecordSource;

/// In-memory record source: an owned backlog plus a cursor.
///
/// Intended for tests and embedding. Each pull moves the next record out of
/// the backlog; the cursor never rewinds, so a yielded record can never be
/// yielded twice. [`feed`] replaces the whole backlog and resets the cursor
/// to the start.
///
/// [`feed`]: MemorySource::feed
#[derive(Debug, Default)]
pub struct MemorySource {
    backlog: std::vec::IntoIter<Record>,
}

impl MemorySource {
    /// Create an empty source. Pulling from it returns `None` immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source pre-fed with the given backlog.
    pub fn with_backlog(records: Vec<Record>) -> Self {
        Self {
            backlog: records.into_iter(),
        }
    }

    /// Convenience constructor from raw timestamps, in the given order.
    pub fn from_timestamps(timestamps: &[u64]) -> Self {
        Self::with_backlog(timestamps.iter().map(|&ts| Record::new(ts)).collect())
    }

    /// Replace the entire backlog and reset the cursor to the start.
    ///
    /// Calling this while a merge is consuming the source is outside the
    /// engine's guarantees; feed sources fully before merging.
    pub fn feed(&mut self, records: Vec<Record>) {
        self.backlog = records.into_iter();
    }

    /// Number of records not yet yielded.
    pub fn remaining(&self) -> usize {
        self.backlog.len()
    }

    /// Returns `true` if every record has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.backlog.len() == 0
    }
}

impl RecordSource for MemorySource {
    fn pull(&mut self) -> Option<Record> {
        let record = self.backlog.next();
        if let Some(ref r) = record {
            trace!(timestamp = r.timestamp(), "pulled record");
        }
        record
    }
}
