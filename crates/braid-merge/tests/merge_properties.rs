//! Property-based tests for the merge engine.
//!
//! Verifies the universal guarantees over arbitrary backlogs:
//! - the merged sequence is non-decreasing end-to-end
//! - conservation: the merged multiset equals the union of all backlogs
//! - the engine runs exactly as many rounds as the longest source
//! - the tail-distance heuristic never shrinks

use proptest::prelude::*;

use braid_merge::{AdaptiveInserter, MergeEngine, SequenceValidator, SortedSequence};
use braid_source::{MemorySource, RecordSource, SyntheticFeed};
use braid_types::Record;

/// Arbitrary set of backlogs: up to 8 sources of up to 40 records each,
/// each backlog in arbitrary internal order.
fn arb_backlogs() -> impl Strategy<Value = Vec<Vec<u64>>> {
    prop::collection::vec(prop::collection::vec(0u64..1_000, 0..40), 0..8)
}

/// Like [`arb_backlogs`] but each backlog sorted ascending, the workload
/// the fast-append path is tuned for.
fn arb_sorted_backlogs() -> impl Strategy<Value = Vec<Vec<u64>>> {
    arb_backlogs().prop_map(|mut backlogs| {
        for backlog in &mut backlogs {
            backlog.sort_unstable();
        }
        backlogs
    })
}

fn run_merge(backlogs: &[Vec<u64>]) -> braid_merge::MergeResult {
    let sources: Vec<Box<dyn RecordSource>> = backlogs
        .iter()
        .map(|ts| Box::new(MemorySource::from_timestamps(ts)) as Box<dyn RecordSource>)
        .collect();
    MergeEngine::new(sources).run()
}

proptest! {
    #[test]
    fn merged_sequence_is_sorted(backlogs in arb_backlogs()) {
        let result = run_merge(&backlogs);
        let ts = result.sequence.timestamps();
        prop_assert!(ts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn no_record_lost_duplicated_or_fabricated(backlogs in arb_backlogs()) {
        let expected: Vec<u64> = backlogs.iter().flatten().copied().collect();
        let result = run_merge(&backlogs);
        let report = SequenceValidator::validate(&result.sequence, &expected);
        prop_assert!(report.is_valid(), "violations: {:?}", report.violations);
        prop_assert_eq!(result.stats.records as usize, expected.len());
    }

    #[test]
    fn round_count_is_longest_source(backlogs in arb_backlogs()) {
        let longest = backlogs.iter().map(Vec::len).max().unwrap_or(0);
        let result = run_merge(&backlogs);
        prop_assert_eq!(result.stats.rounds as usize, longest);
    }

    #[test]
    fn sorted_sources_still_sort_globally(backlogs in arb_sorted_backlogs()) {
        let expected: Vec<u64> = backlogs.iter().flatten().copied().collect();
        let result = run_merge(&backlogs);
        let report = SequenceValidator::validate(&result.sequence, &expected);
        prop_assert!(report.is_valid());
    }

    #[test]
    fn insertion_path_counters_account_for_everything(backlogs in arb_backlogs()) {
        let result = run_merge(&backlogs);
        let s = &result.stats;
        prop_assert_eq!(s.appends + s.window_searches + s.full_searches, s.records);
    }

    #[test]
    fn max_distance_never_shrinks(timestamps in prop::collection::vec(0u64..1_000, 0..200)) {
        let mut sequence = SortedSequence::new();
        let mut inserter = AdaptiveInserter::new();
        let mut previous = inserter.max_distance();
        for ts in timestamps {
            inserter.insert(&mut sequence, Record::new(ts));
            let current = inserter.max_distance();
            prop_assert!(current >= previous);
            previous = current;
        }
    }
}

#[test]
fn synthetic_feed_end_to_end() {
    // Ten sources of three random records in 0..=100, merged and
    // independently validated.
    let mut feed = SyntheticFeed::new(0xb7a1d);
    let backlogs: Vec<Vec<Record>> = (0..10).map(|_| feed.backlog(3)).collect();
    let expected: Vec<u64> = backlogs
        .iter()
        .flatten()
        .map(Record::timestamp)
        .collect();

    let sources: Vec<Box<dyn RecordSource>> = backlogs
        .into_iter()
        .map(|b| Box::new(MemorySource::with_backlog(b)) as Box<dyn RecordSource>)
        .collect();
    let result = MergeEngine::with_expected_records(sources, expected.len()).run();

    let report = SequenceValidator::validate(&result.sequence, &expected);
    assert!(report.is_valid(), "violations: {:?}", report.violations);
    assert_eq!(result.stats.rounds, 3);
    assert_eq!(result.stats.records, 30);
}
