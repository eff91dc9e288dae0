use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A record with a single ordering key, `timestamp`.
///
/// Records are immutable after construction except through
/// [`set_timestamp`], which exists for test harnesses that need to rewrite
/// generated keys. A record is exclusively owned by exactly one container
/// at any instant — a source backlog, a per-round batch, or the merged
/// sequence — and moves between them by value.
///
/// Ordering is total and determined by `timestamp` alone.
///
/// [`set_timestamp`]: Record::set_timestamp
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    timestamp: u64,
}

impl Record {
    /// Create a record with the given timestamp.
    pub const fn new(timestamp: u64) -> Self {
        Self { timestamp }
    }

    /// The record's ordering key.
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Overwrite the timestamp. Harness use only; the merge engine never
    /// mutates a record after it has been pulled.
    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.timestamp = timestamp;
    }

    /// Parse a comma-separated list of timestamps into a backlog.
    ///
    /// Whitespace around entries is ignored; empty entries are rejected.
    /// The list is taken as-is — it is not sorted here.
    pub fn parse_list(input: &str) -> Result<Vec<Record>, TypeError> {
        input
            .split(',')
            .map(|raw| {
                let trimmed = raw.trim();
                trimmed
                    .parse::<u64>()
                    .map(Record::new)
                    .map_err(|_| TypeError::InvalidTimestamp(trimmed.to_string()))
            })
            .collect()
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record({})", self.timestamp)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.timestamp)
    }
}
