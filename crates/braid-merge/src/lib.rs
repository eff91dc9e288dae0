//! Core merge engine for Braid.
//!
//! Merges records from several independent, internally-ordered sources into
//! one globally time-ordered sequence. The design exploits locality: each
//! source is usually non-decreasing on its own, so a newly pulled record
//! usually belongs at or near the tail of the already-merged sequence.
//!
//! This crate provides:
//! - [`SortedSequence`] — the growable ordered container holding the output
//! - [`AdaptiveInserter`] — the insertion policy choosing between an O(1)
//!   tail append, a heuristically bounded tail-window search, and a
//!   full-range fallback search
//! - [`MergeEngine`] — the round-based driver pulling at most one record per
//!   source per round
//! - [`SequenceValidator`] — post-merge sortedness and conservation checks

pub mod engine;
pub mod insert;
pub mod sequence;
pub mod validation;

pub use engine::{MergeEngine, MergeResult, MergeStats};
pub use insert::{AdaptiveInserter, InsertPath};
pub use sequence::SortedSequence;
pub use validation::{SequenceValidator, ValidationReport, Violation, ViolationKind};
