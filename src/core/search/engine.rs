//! Product Search
//!
//! Wires the pipeline stages together:
//! correct → normalize → expand → filter → rank.
//!
//! Language resources are immutable once loaded and live in
//! [`SearchResources`], built once per process and shared by `Arc`.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use super::config::{EmbeddingBackend, EmbeddingConfig, SearchConfig};
use super::embeddings::{Embedder, WordVectorEmbedder};
use super::fastembed_embedder::FastEmbedEmbedder;
use super::filter::filter_candidates;
use super::ranker::{ScoredCandidate, SemanticRanker};
use crate::core::catalog::{CatalogSource, Item};
use crate::core::error::{Result, SearchError};
use crate::core::preprocess::{paths, ProcessedQuery, QueryPipeline};

static GLOBAL_RESOURCES: OnceCell<Arc<SearchResources>> = OnceCell::new();

/// Loaded language resources: corrector, normalizer, expander and embedder.
#[derive(Debug)]
pub struct SearchResources {
    pipeline: QueryPipeline,
    ranker: SemanticRanker,
}

impl SearchResources {
    pub fn new(pipeline: QueryPipeline, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            pipeline,
            ranker: SemanticRanker::new(embedder),
        }
    }

    /// Load every resource the configuration names.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        let pipeline = QueryPipeline::new(config.preprocess.clone())?;
        let embedder = load_embedder(&config.embeddings)?;
        Ok(Self::new(pipeline, embedder))
    }

    /// Process-wide resources. On first use they are loaded with default
    /// settings from the user data directory.
    pub fn global() -> Result<Arc<Self>> {
        GLOBAL_RESOURCES
            .get_or_try_init(|| {
                log::info!("Loading search resources with default settings");
                let mut config = SearchConfig::default();
                if let Some(data_dir) = paths::get_user_data_dir() {
                    config.resolve_data_files(&data_dir);
                }
                Self::from_config(&config).map(Arc::new)
            })
            .cloned()
    }

    /// Initialize the process-wide resources from `config`.
    ///
    /// Only the first successful initialization takes effect; later calls
    /// return the resources already loaded.
    pub fn init_global(config: &SearchConfig) -> Result<Arc<Self>> {
        if let Some(existing) = GLOBAL_RESOURCES.get() {
            log::warn!("Search resources already initialized, ignoring new configuration");
            return Ok(Arc::clone(existing));
        }
        GLOBAL_RESOURCES
            .get_or_try_init(|| Self::from_config(config).map(Arc::new))
            .cloned()
    }

    pub fn pipeline(&self) -> &QueryPipeline {
        &self.pipeline
    }

    pub fn ranker(&self) -> &SemanticRanker {
        &self.ranker
    }
}

fn load_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>> {
    match config.backend {
        EmbeddingBackend::FastEmbed => {
            let model_dir = config
                .model_dir
                .clone()
                .or_else(|| FastEmbedEmbedder::find_model_dir(None))
                .ok_or_else(|| {
                    SearchError::unavailable(
                        "embedding model",
                        "no MiniLM model installed under models/ in the data directory",
                    )
                })?;
            Ok(Arc::new(FastEmbedEmbedder::load_from_dir(&model_dir)?))
        }
        EmbeddingBackend::WordVectors => {
            let path = config.word_vectors_path.as_deref().ok_or_else(|| {
                SearchError::unavailable("embedding model", "word_vectors_path is not set")
            })?;
            Ok(Arc::new(WordVectorEmbedder::from_file(path)?))
        }
    }
}

/// Natural-language search over a catalog.
pub struct ProductSearch {
    resources: Arc<SearchResources>,
    catalog: Arc<dyn CatalogSource>,
}

impl ProductSearch {
    pub fn new(resources: Arc<SearchResources>, catalog: Arc<dyn CatalogSource>) -> Self {
        Self { resources, catalog }
    }

    /// Search with the process-wide resources.
    pub fn with_global_resources(catalog: Arc<dyn CatalogSource>) -> Result<Self> {
        Ok(Self::new(SearchResources::global()?, catalog))
    }

    /// Items matching `raw_query`, most relevant first.
    ///
    /// An empty query or empty catalog gives an empty list, not an error.
    pub fn search(&self, raw_query: &str) -> Result<Vec<Item>> {
        Ok(self
            .search_scored(raw_query)?
            .into_iter()
            .map(|scored| scored.item)
            .collect())
    }

    /// Like [`search`](Self::search), keeping similarity scores.
    pub fn search_scored(&self, raw_query: &str) -> Result<Vec<ScoredCandidate>> {
        let processed = self.process(raw_query)?;
        let items = self.catalog.snapshot()?;
        let candidates = filter_candidates(&processed.expanded, &items);

        // ranked against the corrected query, not the expansion
        let ranked = self
            .resources
            .ranker
            .rank_scored(&processed.text_for_embedding, candidates)?;

        log::debug!(
            "Search {:?} returned {} of {} items",
            raw_query,
            ranked.len(),
            items.len()
        );
        Ok(ranked)
    }

    /// Run only the language stages, for diagnostics.
    pub fn process(&self, raw_query: &str) -> Result<ProcessedQuery> {
        self.resources.pipeline.process(raw_query)
    }

    pub fn resources(&self) -> &Arc<SearchResources> {
        &self.resources
    }
}

impl std::fmt::Debug for ProductSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductSearch")
            .field("resources", &self.resources)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{Category, InMemoryCatalog};
    use crate::tests::common::{fixture_config, fixture_resources};

    fn search_over(items: Vec<Item>) -> ProductSearch {
        ProductSearch::new(fixture_resources(), Arc::new(InMemoryCatalog::new(items)))
    }

    #[test]
    fn test_global_resources_are_shared() {
        let a = fixture_resources();
        let b = SearchResources::init_global(&fixture_config()).unwrap();
        let c = SearchResources::global().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn test_missing_model_is_unavailable() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut config = fixture_config();
        config.embeddings.backend = EmbeddingBackend::FastEmbed;
        config.embeddings.model_dir = Some(temp_dir.path().join("all-MiniLM-L6-v2"));

        let err = SearchResources::from_config(&config).unwrap_err();
        assert!(err.is_dependency_unavailable());
    }

    #[test]
    fn test_word_vectors_backend_needs_path() {
        let mut config = fixture_config();
        config.embeddings.word_vectors_path = None;

        let err = SearchResources::from_config(&config).unwrap_err();
        assert!(err.is_dependency_unavailable());
    }

    #[test]
    fn test_empty_catalog_gives_empty_result() {
        assert!(search_over(Vec::new()).search("aspirin").unwrap().is_empty());
    }

    #[test]
    fn test_empty_query_gives_empty_result() {
        let medicine = Category::new(1, "Medicine").unwrap();
        let search = search_over(vec![Item::new(1, "Aspirin", medicine, 1.0)]);
        assert!(search.search("").unwrap().is_empty());
    }

    #[test]
    fn test_scores_are_descending() {
        let medicine = Category::new(1, "Medicine").unwrap();
        let search = search_over(vec![
            Item::new(1, "Ibuprofen", medicine.clone(), 3.0),
            Item::new(2, "Aspirin", medicine.clone(), 1.5),
            Item::new(3, "Tylenol", medicine, 2.2),
        ]);

        let scored = search.search_scored("medicine").unwrap();
        assert_eq!(scored.len(), 3);
        assert!(scored.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
