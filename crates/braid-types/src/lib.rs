//! Foundation types for Braid.
//!
//! This crate provides the record value type that every other Braid crate
//! operates on.
//!
//! # Key Types
//!
//! - [`Record`] — A value with one ordering key, `timestamp`
//! - [`TypeError`] — Parse failures when reading records from text

pub mod error;
pub mod record;

pub use error::TypeError;
pub use record::Record;
