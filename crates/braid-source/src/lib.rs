//! Pull-based record sources for Braid.
//!
//! A source owns an ordered backlog of records and yields them one at a
//! time, in its own internal order, until exhausted. The merge engine only
//! sees the [`RecordSource`] trait; how a backlog came to exist (in-memory
//! fixture, synthetic generation, file replay) is this crate's concern.

pub mod memory;
pub mod synthetic;
pub mod traits;

pub use memory::MemorySource;
pub use synthetic::SyntheticFeed;
pub use traits::RecordSource;
