//! Clean-First LRU Policy Tests.
//!
//! Exercises `CleanFirstLruPolicy` in isolation: candidate sets are built
//! directly from `(dirty, tick)` descriptions, no cache required.

use rstest::rstest;
use wblru_core::Tick;
use wblru_core::cache::policies::{CleanFirstLruPolicy, ReplacementData, ReplacementPolicy};

use crate::common::candidates::{CandidateSet, Line, Line::Clean, Line::Dirty};

fn victim_way(lines: &[Line]) -> usize {
    let set = CandidateSet::new(lines);
    let candidates = set.candidates();
    CleanFirstLruPolicy::new().get_victim(&candidates).way
}

// ══════════════════════════════════════════════════════════
// 1. Selection scenarios
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::lowest_clean_wins(vec![Clean(5), Dirty(1), Clean(9)], 0)]
#[case::all_dirty_lowest_wins(vec![Dirty(5), Dirty(2)], 1)]
#[case::clean_beats_much_older_dirty(vec![Clean(100), Dirty(1)], 0)]
#[case::single_clean(vec![Clean(7)], 0)]
#[case::single_dirty(vec![Dirty(7)], 0)]
#[case::clean_found_late(vec![Dirty(1), Dirty(2), Dirty(3), Clean(50)], 3)]
#[case::oldest_clean_among_many(vec![Clean(40), Clean(30), Dirty(2), Clean(35)], 1)]
fn selects_expected_way(#[case] lines: Vec<Line>, #[case] expected: usize) {
    assert_eq!(victim_way(&lines), expected);
}

#[rstest]
#[case::clean_tie(vec![Clean(4), Dirty(1), Clean(4)], 0)]
#[case::dirty_tie(vec![Dirty(3), Dirty(3), Dirty(8)], 0)]
#[case::tie_after_larger(vec![Clean(9), Clean(2), Clean(2)], 1)]
fn ties_keep_first_seen(#[case] lines: Vec<Line>, #[case] expected: usize) {
    assert_eq!(victim_way(&lines), expected);
}

/// Invalidating the clean line of a {clean@100, dirty@1} set makes it the
/// victim through ordinary minimum-timestamp comparison.
#[test]
fn invalidated_clean_line_is_selected() {
    let policy = CleanFirstLruPolicy::new();
    let mut set = CandidateSet::new(&[Clean(100), Dirty(1)]);
    assert_eq!(policy.get_victim(&set.candidates()).way, 0);

    policy.invalidate(set.data_mut(0));
    assert_eq!(set.data(0).last_touch_tick, Tick::NEVER);

    let candidates = set.candidates();
    let victim = policy.get_victim(&candidates);
    assert_eq!(victim.way, 0);
    assert!(victim.tick().is_never());
}

#[test]
fn invalidated_line_precedes_others_in_its_partition() {
    let policy = CleanFirstLruPolicy::new();
    let mut set = CandidateSet::new(&[Dirty(3), Dirty(20), Dirty(9)]);
    policy.invalidate(set.data_mut(1));
    assert_eq!(policy.get_victim(&set.candidates()).way, 1);
}

#[test]
fn max_tick_candidate_is_still_eligible() {
    let mut set = CandidateSet::new(&[Clean(0), Dirty(1)]);
    set.data_mut(0).last_touch_tick = Tick::MAX;
    assert_eq!(
        CleanFirstLruPolicy::new().get_victim(&set.candidates()).way,
        0
    );
}

#[test]
fn victim_is_an_element_of_the_input() {
    let set = CandidateSet::new(&[Dirty(5), Clean(6), Clean(2)]);
    let candidates = set.candidates();
    let victim = CleanFirstLruPolicy::new().get_victim(&candidates);
    assert!(std::ptr::eq(victim, &candidates[2]));
}

#[test]
fn selection_does_not_mutate_metadata() {
    let set = CandidateSet::new(&[Dirty(5), Clean(6), Clean(2)]);
    let before = set.snapshot();
    let candidates = set.candidates();
    let _ = CleanFirstLruPolicy::new().get_victim(&candidates);
    assert_eq!(set.snapshot(), before);
}

#[test]
#[should_panic(expected = "at least one candidate")]
fn empty_candidate_set_panics() {
    let _ = CleanFirstLruPolicy::new().get_victim(&[]);
}

// ══════════════════════════════════════════════════════════
// 2. Recency tracking
// ══════════════════════════════════════════════════════════

#[test]
fn fresh_entry_starts_invalidated() {
    let entry = CleanFirstLruPolicy::new().instantiate_entry();
    assert_eq!(entry, ReplacementData::default());
    assert!(entry.is_invalidated());
}

#[test]
fn fresh_entry_accepts_touch_and_invalidate() {
    let policy = CleanFirstLruPolicy::new();
    let mut entry = policy.instantiate_entry();
    policy.touch(&mut entry, Tick::new(3));
    assert_eq!(entry.last_touch_tick, Tick::new(3));

    let mut other = policy.instantiate_entry();
    policy.invalidate(&mut other);
    assert!(other.is_invalidated());
}

#[test]
fn reset_stamps_current_time() {
    let policy = CleanFirstLruPolicy::new();
    let mut entry = policy.instantiate_entry();
    policy.reset(&mut entry, Tick::new(12));
    assert_eq!(entry.last_touch_tick, Tick::new(12));
    assert!(!entry.is_invalidated());
}

#[test]
fn reset_and_touch_are_equivalent() {
    let policy = CleanFirstLruPolicy::new();
    let mut touched = policy.instantiate_entry();
    let mut reset = policy.instantiate_entry();
    policy.touch(&mut touched, Tick::new(77));
    policy.reset(&mut reset, Tick::new(77));
    assert_eq!(touched, reset);
}

#[test]
fn touch_then_invalidate_returns_to_sentinel() {
    let policy = CleanFirstLruPolicy::new();
    let mut entry = policy.instantiate_entry();
    policy.reset(&mut entry, Tick::new(5));
    policy.touch(&mut entry, Tick::new(9));
    policy.invalidate(&mut entry);
    assert_eq!(entry.last_touch_tick, Tick::NEVER);

    policy.reset(&mut entry, Tick::new(10));
    assert_eq!(entry.last_touch_tick, Tick::new(10));
}

#[test]
fn policy_name() {
    assert_eq!(CleanFirstLruPolicy::new().name(), "clean_first_lru");
}
