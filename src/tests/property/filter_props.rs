//! Property-based tests for Candidate Filtering
//!
//! Tests invariants:
//! - Result is a subsequence of the catalog (order kept, no duplicates)
//! - Every kept item matches and every dropped item does not
//! - An empty query matches nothing

use proptest::prelude::*;

use crate::core::catalog::{Category, Item};
use crate::core::search::{filter_candidates, matches_query};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

const NAMES: &[&str] = &["Aspirin", "Ibuprofen", "Tylenol", "Mint", "Zinc", "Melatonin"];
const CATEGORIES: &[&str] = &["Medicine", "Herbs", "Vitamins", "Sleep"];
const WORDS: &[&str] = &[
    "pain", "reliever", "relief", "headache", "medicine", "fast", "acting", "sleep", "aid",
    "herbal", "tea", "mint", "zinc", "vitamin", "cold",
];

fn arb_description() -> impl Strategy<Value = Option<String>> {
    prop::option::of(
        prop::collection::vec(prop::sample::select(WORDS), 1..4).prop_map(|w| w.join(" ")),
    )
}

fn arb_catalog() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(
        (
            prop::sample::select(NAMES),
            prop::sample::select(CATEGORIES),
            arb_description(),
        ),
        0..20,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, category, description))| {
                let category = Category {
                    id: 1,
                    name: category.to_string(),
                };
                let mut item = Item::new(i as u64, name, category, 1.0);
                item.description = description;
                item
            })
            .collect()
    })
}

fn arb_expanded_query() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..6).prop_map(|w| w.join(" "))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn result_is_catalog_subsequence(catalog in arb_catalog(), query in arb_expanded_query()) {
        let result = filter_candidates(&query, &catalog);

        let mut remaining = catalog.iter();
        for item in &result {
            prop_assert!(
                remaining.any(|candidate| candidate.id == item.id),
                "item {} out of catalog order",
                item.id
            );
        }
    }

    #[test]
    fn keeps_exactly_matching_items(catalog in arb_catalog(), query in arb_expanded_query()) {
        let result = filter_candidates(&query, &catalog);
        let kept: Vec<u64> = result.iter().map(|item| item.id).collect();
        let expected: Vec<u64> = catalog
            .iter()
            .filter(|item| matches_query(&query, item))
            .map(|item| item.id)
            .collect();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn name_in_query_always_matches(catalog in arb_catalog(), query in arb_expanded_query()) {
        for item in &catalog {
            let with_name = format!("{} {}", query, item.name.to_lowercase());
            prop_assert!(matches_query(&with_name, item));
        }
    }

    #[test]
    fn empty_query_matches_nothing(catalog in arb_catalog()) {
        prop_assert!(filter_candidates("", &catalog).is_empty());
    }
}
