//! Semantic Ranking
//!
//! Orders candidates by cosine similarity between the query embedding and
//! each item name's embedding.

use std::sync::Arc;

use serde::Serialize;

use super::embeddings::{cosine_similarity, Embedder};
use crate::core::catalog::Item;
use crate::core::error::{Result, SearchError};

/// A candidate with its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub item: Item,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
}

pub struct SemanticRanker {
    embedder: Arc<dyn Embedder>,
}

impl SemanticRanker {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Candidates ordered by decreasing similarity to `query`.
    pub fn rank(&self, query: &str, candidates: Vec<Item>) -> Result<Vec<Item>> {
        Ok(self
            .rank_scored(query, candidates)?
            .into_iter()
            .map(|scored| scored.item)
            .collect())
    }

    /// Like [`rank`](Self::rank), keeping the scores.
    ///
    /// Sorting is stable: equal scores keep their input order.
    pub fn rank_scored(&self, query: &str, candidates: Vec<Item>) -> Result<Vec<ScoredCandidate>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(query)?;
        let names: Vec<String> = candidates.iter().map(Item::name_lower).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let item_vectors = self.embedder.embed_batch(&name_refs)?;

        if item_vectors.len() != candidates.len() {
            return Err(SearchError::unavailable(
                "embedding model",
                format!(
                    "returned {} vectors for {} candidates",
                    item_vectors.len(),
                    candidates.len()
                ),
            ));
        }

        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .zip(item_vectors)
            .map(|(item, vector)| ScoredCandidate {
                score: cosine_similarity(&query_vector, &vector),
                item,
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scored)
    }
}

impl std::fmt::Debug for SemanticRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticRanker")
            .field("dimension", &self.embedder.dimension())
            .finish()
    }
}
