use braid_types::Record;

/// An ordered, pull-based, single-pass supplier of records.
///
/// All implementations must satisfy these invariants:
/// - `pull` yields ownership of the next record in the source's internal
///   order; a yielded record is never yielded again.
/// - Once `pull` returns `None`, every subsequent call returns `None`
///   (idempotent terminal state).
/// - Pulling never blocks and never fails; exhaustion is the only terminal
///   condition.
///
/// Sources are fully fed before a merge begins. Replacing a backlog while
/// a merge is in progress voids the engine's ordering guarantees.
pub trait RecordSource {
    /// Yield the next record, or `None` if the source is exhausted.
    fn pull(&mut self) -> Option<Record>;
}
