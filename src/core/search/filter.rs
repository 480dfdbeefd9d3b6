//! Candidate Filtering
//!
//! Selects catalog items whose name, category or description vocabulary
//! occurs in the expanded query. Matching is by substring containment, so a
//! short description word such as "a" matches almost any query.

use rayon::prelude::*;

use crate::core::catalog::Item;

/// Whether `item` is a candidate for the expanded query.
pub fn matches_query(expanded_query: &str, item: &Item) -> bool {
    if expanded_query.contains(&item.name_lower())
        || expanded_query.contains(&item.category.name.to_lowercase())
    {
        return true;
    }

    item.description_tokens()
        .iter()
        .any(|token| expanded_query.contains(token.as_str()))
}

/// Items matching the expanded query, in catalog order.
pub fn filter_candidates(expanded_query: &str, items: &[Item]) -> Vec<Item> {
    let candidates: Vec<Item> = items
        .par_iter()
        .filter(|item| matches_query(expanded_query, item))
        .cloned()
        .collect();

    log::debug!(
        "Filtered {} of {} items as candidates",
        candidates.len(),
        items.len()
    );
    candidates
}
