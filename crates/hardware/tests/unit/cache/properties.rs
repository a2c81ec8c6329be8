//! Randomized checks of the victim selection and recency tracking contracts.

use proptest::prelude::*;
use wblru_core::Tick;
use wblru_core::cache::policies::{CleanFirstLruPolicy, LruPolicy, ReplacementPolicy};

use crate::common::candidates::CandidateSet;

/// Non-empty candidate sets of `(dirty, tick)` with real (non-sentinel) ticks.
/// The narrow tick range makes ties common.
fn candidate_sets() -> impl Strategy<Value = Vec<(bool, u64)>> {
    prop::collection::vec((any::<bool>(), 1u64..16), 1..12)
}

/// Index of the first pair with the minimum tick among those accepted by `keep`.
fn first_oldest(pairs: &[(bool, u64)], keep: impl Fn(bool) -> bool) -> Option<usize> {
    pairs
        .iter()
        .enumerate()
        .filter(|(_, (dirty, _))| keep(*dirty))
        .min_by_key(|(i, (_, tick))| (*tick, *i))
        .map(|(i, _)| i)
}

proptest! {
    #[test]
    fn clean_first_prefers_oldest_clean(pairs in candidate_sets()) {
        let set = CandidateSet::from_pairs(&pairs);
        let candidates = set.candidates();
        let victim = CleanFirstLruPolicy::new().get_victim(&candidates);

        let expected = first_oldest(&pairs, |dirty| !dirty)
            .or_else(|| first_oldest(&pairs, |dirty| dirty));
        prop_assert_eq!(Some(victim.way), expected);

        if pairs.iter().any(|(dirty, _)| !dirty) {
            prop_assert!(!victim.dirty);
            for c in candidates.iter().filter(|c| !c.dirty) {
                prop_assert!(victim.tick() <= c.tick());
            }
        } else {
            for c in &candidates {
                prop_assert!(victim.tick() <= c.tick());
            }
        }
    }

    #[test]
    fn lru_picks_global_first_oldest(pairs in candidate_sets()) {
        let set = CandidateSet::from_pairs(&pairs);
        let candidates = set.candidates();
        let victim = LruPolicy::new().get_victim(&candidates);
        prop_assert_eq!(Some(victim.way), first_oldest(&pairs, |_| true));
    }

    #[test]
    fn selection_is_pure(pairs in candidate_sets()) {
        let set = CandidateSet::from_pairs(&pairs);
        let before = set.snapshot();
        let candidates = set.candidates();
        let first = CleanFirstLruPolicy::new().get_victim(&candidates).way;
        let second = CleanFirstLruPolicy::new().get_victim(&candidates).way;
        prop_assert_eq!(first, second);
        prop_assert_eq!(set.snapshot(), before);
    }

    #[test]
    fn invalidated_line_wins_its_partition(pairs in candidate_sets(), pick in any::<prop::sample::Index>()) {
        let target = pick.index(pairs.len());
        let mut set = CandidateSet::from_pairs(&pairs);
        let policy = CleanFirstLruPolicy::new();
        policy.invalidate(set.data_mut(target));

        let candidates = set.candidates();
        let victim = policy.get_victim(&candidates);
        let target_dirty = pairs[target].0;
        let clean_exists = pairs.iter().any(|(dirty, _)| !dirty);

        // The invalidated line is the unique minimum of its partition.
        if !target_dirty || !clean_exists {
            prop_assert_eq!(victim.way, target);
        } else {
            prop_assert!(!victim.dirty);
        }
    }

    #[test]
    fn touch_is_idempotent_at_same_time(t in 1u64..u64::MAX) {
        let policy = CleanFirstLruPolicy::new();
        let mut once = policy.instantiate_entry();
        let mut twice = policy.instantiate_entry();
        policy.touch(&mut once, Tick::new(t));
        policy.touch(&mut twice, Tick::new(t));
        policy.touch(&mut twice, Tick::new(t));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn touch_keeps_latest_time(t1 in 1u64..1_000_000, delta in 1u64..1_000_000) {
        let policy = CleanFirstLruPolicy::new();
        let mut entry = policy.instantiate_entry();
        policy.reset(&mut entry, Tick::new(t1));
        policy.touch(&mut entry, Tick::new(t1 + delta));
        prop_assert_eq!(entry.last_touch_tick, Tick::new(t1 + delta));
    }
}
