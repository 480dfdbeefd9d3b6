//! Property-based tests for Semantic Ranking
//!
//! Tests invariants:
//! - Result is a permutation of the candidates
//! - Scores never increase down the list
//! - Equal scores keep candidate order
//! - Same query returns same order

use proptest::prelude::*;
use std::cmp::Ordering;

use crate::core::catalog::{Category, Item};
use crate::tests::common::fixture_resources;

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

const NAMES: &[&str] = &[
    "Aspirin", "Ibuprofen", "Tylenol", "Mint", "Zinc", "Melatonin", "Unknownium", "Pain Relief",
];
const QUERIES: &[&str] = &[
    "pain reliever", "headache", "sleep", "aspirin", "", "zzz qqq", "fast acting pain relief",
];

fn arb_candidates() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(prop::sample::select(NAMES), 0..12).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let category = Category {
                    id: 1,
                    name: "Medicine".to_string(),
                };
                Item::new(i as u64, name, category, 1.0)
            })
            .collect()
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn ranking_is_a_permutation(candidates in arb_candidates(), query in prop::sample::select(QUERIES)) {
        let resources = fixture_resources();
        let ranked = resources.ranker().rank(query, candidates.clone()).unwrap();

        let mut ranked_ids: Vec<u64> = ranked.iter().map(|item| item.id).collect();
        ranked_ids.sort_unstable();
        let expected: Vec<u64> = candidates.iter().map(|item| item.id).collect();
        prop_assert_eq!(ranked_ids, expected);
    }

    #[test]
    fn scores_descend_and_ties_keep_order(
        candidates in arb_candidates(),
        query in prop::sample::select(QUERIES),
    ) {
        let resources = fixture_resources();
        let scored = resources.ranker().rank_scored(query, candidates).unwrap();

        for pair in scored.windows(2) {
            let order = pair[0].score.total_cmp(&pair[1].score);
            prop_assert_ne!(order, Ordering::Less);
            if order == Ordering::Equal {
                prop_assert!(pair[0].item.id < pair[1].item.id);
            }
        }
    }

    #[test]
    fn ranking_is_deterministic(candidates in arb_candidates(), query in prop::sample::select(QUERIES)) {
        let resources = fixture_resources();
        let first = resources.ranker().rank(query, candidates.clone()).unwrap();
        let second = resources.ranker().rank(query, candidates).unwrap();
        prop_assert_eq!(first, second);
    }
}
