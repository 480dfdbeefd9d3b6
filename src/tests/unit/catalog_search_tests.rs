use std::sync::Arc;

use crate::core::catalog::{CatalogSource, InMemoryCatalog, Item};
use crate::core::search::ProductSearch;
use crate::tests::common::*;

#[test]
fn test_category_word_selects_whole_category() {
    let search = search_over(mixed_catalog());
    let results = search.search("medicine for my head").unwrap();

    let mut found = ids(&results);
    found.sort_unstable();
    assert_eq!(found, vec![1, 2, 3]);
}

#[test]
fn test_item_without_description_found_by_name() {
    let search = search_over(mixed_catalog());
    let results = search.search("mint").unwrap();
    assert_eq!(names(&results), vec!["Mint"]);
}

#[test]
fn test_plural_query_matches_singular_description() {
    let search = search_over(mixed_catalog());
    let results = search.search("tablets for headaches").unwrap();
    assert_eq!(names(&results), vec!["Ibuprofen"]);
}

#[test]
fn test_unrelated_query_finds_nothing() {
    let search = search_over(mixed_catalog());
    assert!(search.search("das auto").unwrap().is_empty());
}

#[test]
fn test_misspelled_name_found() {
    let search = search_over(pharmacy_catalog());
    let results = search.search("aspirn").unwrap();
    assert_eq!(names(&results), vec!["Aspirin"]);
}

#[test]
fn test_closest_name_ranked_first() {
    let search = search_over(pharmacy_catalog());
    let scored = search.search_scored("pain reliever").unwrap();

    assert_eq!(scored.len(), 2);
    assert_eq!(scored[0].item.name, "Aspirin");
    assert_eq!(scored[1].item.name, "Tylenol");
    assert!(scored[0].score > scored[1].score);
}

#[test]
fn test_catalog_replacement_visible_to_next_search() {
    let catalog = Arc::new(InMemoryCatalog::new(pharmacy_catalog()));
    let search = ProductSearch::new(
        fixture_resources(),
        catalog.clone() as Arc<dyn CatalogSource>,
    );
    assert_eq!(search.search("mint").unwrap().len(), 0);

    catalog.replace(vec![Item::new(4, "Mint", herbs(), 0.8)]);
    assert_eq!(names(&search.search("mint").unwrap()), vec!["Mint"]);
}

#[test]
fn test_search_does_not_mutate_catalog() {
    let catalog = Arc::new(InMemoryCatalog::new(pharmacy_catalog()));
    let search = ProductSearch::new(
        fixture_resources(),
        catalog.clone() as Arc<dyn CatalogSource>,
    );

    search.search("pain reliever").unwrap();
    assert_eq!(*catalog.snapshot().unwrap(), pharmacy_catalog());
}

#[test]
fn test_explain_exposes_every_stage() {
    let search = search_over(pharmacy_catalog());
    let processed = search.process("Tablets for headaches").unwrap();

    assert_eq!(processed.corrected, "Tablets for headaches");
    assert_eq!(processed.normalized, "tablet headache");
    assert!(processed.expanded.contains("cephalalgia"));
    assert!(processed.expanded.contains("pill"));
    assert_eq!(processed.text_for_embedding, processed.corrected);
}
