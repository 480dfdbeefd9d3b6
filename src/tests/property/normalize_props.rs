//! Property-based tests for Query Normalization
//!
//! Tests invariants:
//! - Output tokens are lowercase, alphabetic and not stopwords
//! - Normalization is idempotent over a closed lemma vocabulary
//! - Punctuation and digits never reach the output

use proptest::prelude::*;

use crate::tests::common::{small_normalizer, INFLECTED_FORMS, LEMMA_VOCABULARY};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_word() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(LEMMA_VOCABULARY).prop_map(str::to_string),
        prop::sample::select(INFLECTED_FORMS).prop_map(str::to_string),
        prop::sample::select(&["the", "for", "my", "and", "Is", "THE"][..]).prop_map(str::to_string),
        "[a-zA-Z]{1,8}",
        "[0-9]{1,4}",
        "[!?.,;:]{1,3}",
    ]
}

fn arb_query() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_word(), 0..10).prop_map(|words| words.join(" "))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn output_tokens_are_clean(query in arb_query()) {
        let normalizer = small_normalizer();
        let normalized = normalizer.normalize(&query);

        for token in normalized.split_whitespace() {
            prop_assert!(token.chars().all(char::is_alphabetic), "non-alphabetic token {:?}", token);
            prop_assert_eq!(token.to_lowercase(), token);
            prop_assert!(!normalizer.is_stopword(token), "stopword {:?} kept", token);
        }
    }

    #[test]
    fn normalization_is_idempotent(query in arb_query()) {
        let normalizer = small_normalizer();
        let once = normalizer.normalize(&query);
        let twice = normalizer.normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn inflected_forms_reduce_to_vocabulary(word in prop::sample::select(INFLECTED_FORMS)) {
        let normalizer = small_normalizer();
        let lemma = normalizer.normalize(word);
        prop_assert!(LEMMA_VOCABULARY.contains(&lemma.as_str()), "{} -> {}", word, lemma);
    }
}
