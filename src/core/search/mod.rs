//! Product Search Module
//!
//! Candidate filtering, embedding-based ranking and the orchestrating
//! [`ProductSearch`] entry point.

pub mod config;
pub mod embeddings;
pub mod engine;
pub mod fastembed_embedder;
pub mod filter;
pub mod ranker;

pub use config::{EmbeddingBackend, EmbeddingConfig, SearchConfig};
pub use embeddings::{cosine_similarity, Embedder, WordVectorEmbedder};
pub use engine::{ProductSearch, SearchResources};
pub use fastembed_embedder::FastEmbedEmbedder;
pub use filter::{filter_candidates, matches_query};
pub use ranker::{ScoredCandidate, SemanticRanker};
