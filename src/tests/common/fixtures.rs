//! Test Fixtures
//!
//! Provides the reference pharmacy catalog and search handles built on the
//! small language resources under `tests/fixtures/`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::catalog::{Category, InMemoryCatalog, Item};
use crate::core::preprocess::{Lemmatizer, PreprocessConfig, QueryNormalizer};
use crate::core::search::{EmbeddingBackend, ProductSearch, SearchConfig, SearchResources};

// =============================================================================
// Catalog Fixtures
// =============================================================================

pub fn medicine() -> Category {
    Category::new(1, "Medicine").expect("valid category")
}

pub fn herbs() -> Category {
    Category::new(2, "Herbs").expect("valid category")
}

/// Aspirin, Ibuprofen and Tylenol, all in "Medicine".
pub fn pharmacy_catalog() -> Vec<Item> {
    vec![
        Item::new(1, "Aspirin", medicine(), 1.5)
            .with_description("Pain reliever")
            .with_quantity(10),
        Item::new(2, "Ibuprofen", medicine(), 3.0)
            .with_description("Headache medicine")
            .with_quantity(20),
        Item::new(3, "Tylenol", medicine(), 2.2)
            .with_description("Fast acting pain relief")
            .with_quantity(15),
    ]
}

/// The pharmacy catalog plus an herbal item with no description.
pub fn mixed_catalog() -> Vec<Item> {
    let mut items = pharmacy_catalog();
    items.push(Item::new(4, "Mint", herbs(), 0.8).with_quantity(5));
    items
}

pub fn ids(items: &[Item]) -> Vec<u64> {
    items.iter().map(|item| item.id).collect()
}

pub fn names(items: &[Item]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

// =============================================================================
// Search Fixtures
// =============================================================================

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Preprocessing over a general-English sample dictionary and a sample synset
/// file, with the bundled pharmacy terms layered on.
pub fn fixture_preprocess_config() -> PreprocessConfig {
    let mut config = PreprocessConfig::default();
    config.typo.english_dict_path = Some(fixture_path("frequency_dictionary_en_sample.txt"));
    config.synonyms.lexicon_path = Some(fixture_path("lexicon_sample.txt"));
    config
}

/// [`fixture_preprocess_config`] plus static word vectors for ranking.
pub fn fixture_config() -> SearchConfig {
    let mut config = SearchConfig {
        preprocess: fixture_preprocess_config(),
        ..SearchConfig::default()
    };
    config.embeddings.backend = EmbeddingBackend::WordVectors;
    config.embeddings.word_vectors_path = Some(fixture_path("word_vectors.txt"));
    config
}

/// Process-wide resources, initialized from [`fixture_config`].
pub fn fixture_resources() -> Arc<SearchResources> {
    SearchResources::init_global(&fixture_config()).expect("fixture resources load")
}

/// Search over `items` using the shared fixture resources.
pub fn search_over(items: Vec<Item>) -> ProductSearch {
    ProductSearch::new(fixture_resources(), Arc::new(InMemoryCatalog::new(items)))
}

// =============================================================================
// Language Fixtures
// =============================================================================

/// Lemma vocabulary with no entry reducible to another entry.
pub const LEMMA_VOCABULARY: &[&str] = &[
    "medicine", "pain", "box", "church", "dish", "fox", "glass", "berry", "relief", "aspirin",
    "tablet", "headache", "mouse",
];

/// Inflected forms of [`LEMMA_VOCABULARY`] entries.
pub const INFLECTED_FORMS: &[&str] = &[
    "medicines", "pains", "boxes", "churches", "dishes", "foxes", "glasses", "berries",
    "tablets", "headaches", "mice",
];

pub fn small_normalizer() -> QueryNormalizer {
    let exceptions = HashMap::from([("mice".to_string(), "mouse".to_string())]);
    let vocabulary = LEMMA_VOCABULARY.iter().map(|w| w.to_string());
    QueryNormalizer::new(Lemmatizer::new(exceptions, vocabulary))
}
