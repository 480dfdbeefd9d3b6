//! Text Embeddings
//!
//! The [`Embedder`] trait maps text to fixed-dimension vectors for semantic
//! ranking. The default backend is the MiniLM sentence model in
//! [`super::fastembed_embedder`]. [`WordVectorEmbedder`] averages static word
//! vectors (word2vec / GloVe text format) and serves deployments that ship a
//! pretrained vectors file instead of an ONNX model.

use std::collections::HashMap;
use std::path::Path;

use crate::core::error::{Result, SearchError};
use crate::core::preprocess::tokenize;

const RESOURCE: &str = "embedding model";

/// Trait for text embedding implementations.
///
/// All embedders must produce vectors of length [`dimension()`](Self::dimension).
/// Implementations must be `Send + Sync`; one instance is shared by every
/// concurrent search.
pub trait Embedder: Send + Sync {
    /// Embed a single text into a vector.
    ///
    /// Text with no known words embeds to the zero vector, which has
    /// similarity 0 with everything.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed multiple texts, in input order.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Vector dimension
    fn dimension(&self) -> usize;
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 when either vector has zero norm or the lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Mean-of-word-vectors embedder.
pub struct WordVectorEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl WordVectorEmbedder {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SearchError::unavailable(RESOURCE, format!("{}: {e}", path.display()))
        })?;
        let embedder = Self::parse(&contents)?;
        log::info!(
            "Loaded {} word vectors ({} dims) from {}",
            embedder.vocabulary_size(),
            embedder.dimension,
            path.display()
        );
        Ok(embedder)
    }

    /// Parse `word v1 v2 ...` lines. An optional `count dimension` header
    /// line is skipped. Every vector must have the same dimension.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut vectors = HashMap::new();
        let mut dimension = 0;

        for (line_no, line) in contents.lines().enumerate() {
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            let values: Vec<&str> = parts.collect();

            if line_no == 0 && values.len() == 1 && word.parse::<usize>().is_ok() {
                continue;
            }

            let vector = values
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| {
                    SearchError::unavailable(RESOURCE, format!("line {}: {e}", line_no + 1))
                })?;

            if dimension == 0 {
                dimension = vector.len();
            }
            if vector.is_empty() || vector.len() != dimension {
                return Err(SearchError::unavailable(
                    RESOURCE,
                    format!(
                        "line {}: expected {} dimensions, found {}",
                        line_no + 1,
                        dimension,
                        vector.len()
                    ),
                ));
            }
            vectors.insert(word.to_lowercase(), vector);
        }

        if vectors.is_empty() {
            return Err(SearchError::unavailable(RESOURCE, "no word vectors loaded"));
        }

        Ok(Self { vectors, dimension })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectors.len()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(&word.to_lowercase())
    }
}

impl Embedder for WordVectorEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut sum = vec![0.0f32; self.dimension];
        let mut known = 0usize;

        for token in tokenize(text) {
            if let Some(vector) = self.vectors.get(&token.to_lowercase()) {
                for (acc, v) in sum.iter_mut().zip(vector) {
                    *acc += v;
                }
                known += 1;
            }
        }

        if known > 1 {
            let n = known as f32;
            sum.iter_mut().for_each(|v| *v /= n);
        }
        Ok(sum)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

impl std::fmt::Debug for WordVectorEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordVectorEmbedder")
            .field("words", &self.vectors.len())
            .field("dimension", &self.dimension)
            .finish()
    }
}
