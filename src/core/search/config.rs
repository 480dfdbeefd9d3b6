//! Search Configuration
//!
//! Configuration types for the search pipeline and its embedder.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::fastembed_embedder::FastEmbedEmbedder;
use crate::core::preprocess::PreprocessConfig;

/// The `[search]` section: preprocessing settings plus the embedder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(flatten)]
    pub preprocess: PreprocessConfig,
    pub embeddings: EmbeddingConfig,
}

impl SearchConfig {
    /// Fill unset resource paths from what is installed under `data_dir`.
    pub fn resolve_data_files(&mut self, data_dir: &Path) {
        self.preprocess.resolve_data_files(data_dir);
        if self.embeddings.model_dir.is_none() {
            self.embeddings.model_dir = FastEmbedEmbedder::find_model_dir(Some(data_dir));
        }
    }
}

/// Which embedder ranks candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingBackend {
    /// MiniLM sentence model through fastembed
    #[default]
    FastEmbed,
    /// Mean of static word vectors
    WordVectors,
}

/// Embedder settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    /// Local MiniLM bundle (`model.onnx` plus tokenizer files). When unset,
    /// `models/all-MiniLM-L6-v2` is looked up in the data directories.
    pub model_dir: Option<PathBuf>,
    /// Vectors file in word2vec/GloVe text format, required by the
    /// `word_vectors` backend
    pub word_vectors_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattened_preprocess_settings() {
        let config: SearchConfig = toml::from_str(
            r#"
            max_query_chars = 100

            [typo]
            enabled = false

            [embeddings]
            backend = "word_vectors"
            word_vectors_path = "/opt/vectors.txt"
            "#,
        )
        .unwrap();

        assert_eq!(config.preprocess.max_query_chars, 100);
        assert!(!config.preprocess.typo.enabled);
        assert_eq!(config.embeddings.backend, EmbeddingBackend::WordVectors);
        assert_eq!(
            config.embeddings.word_vectors_path,
            Some(PathBuf::from("/opt/vectors.txt"))
        );
    }

    #[test]
    fn test_empty_section_is_default() {
        let config: SearchConfig = toml::from_str("").unwrap();
        assert_eq!(config.embeddings.backend, EmbeddingBackend::FastEmbed);
        assert!(config.embeddings.model_dir.is_none());
        assert!(config.preprocess.synonyms.enabled);
    }

    #[test]
    fn test_resolve_finds_installed_model() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let model_dir = FastEmbedEmbedder::default_model_dir(temp_dir.path());
        std::fs::create_dir_all(&model_dir).unwrap();

        let mut config = SearchConfig::default();
        config.resolve_data_files(temp_dir.path());
        assert_eq!(config.embeddings.model_dir, Some(model_dir));
    }
}
