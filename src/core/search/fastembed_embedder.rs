//! FastEmbed-based sentence embedder (MiniLM).
//!
//! Loads a local ONNX model and tokenizer bundle. Model assets are never
//! downloaded; missing files are reported as
//! [`SearchError::DependencyUnavailable`].

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fastembed::{
    InitOptionsUserDefined, Pooling, TextEmbedding, TokenizerFiles, UserDefinedEmbeddingModel,
};

use super::embeddings::Embedder;
use crate::core::error::{Result, SearchError};
use crate::core::preprocess::paths;

/// Model directory name under `<data_dir>/models/`
pub const MODEL_DIR_NAME: &str = "all-MiniLM-L6-v2";
const EMBEDDING_DIMENSION: usize = 384;

const MODEL_FILE: &str = "model.onnx";
const TOKENIZER_JSON: &str = "tokenizer.json";
const CONFIG_JSON: &str = "config.json";
const SPECIAL_TOKENS_JSON: &str = "special_tokens_map.json";
const TOKENIZER_CONFIG_JSON: &str = "tokenizer_config.json";

const RESOURCE: &str = "embedding model";

/// MiniLM sentence embedder running on ONNX Runtime.
pub struct FastEmbedEmbedder {
    model: Mutex<TextEmbedding>,
    model_dir: PathBuf,
}

impl FastEmbedEmbedder {
    /// Files that must all exist in the model directory.
    pub fn required_model_files() -> &'static [&'static str] {
        &[
            MODEL_FILE,
            TOKENIZER_JSON,
            CONFIG_JSON,
            SPECIAL_TOKENS_JSON,
            TOKENIZER_CONFIG_JSON,
        ]
    }

    /// `<data_dir>/models/all-MiniLM-L6-v2`
    pub fn default_model_dir(data_dir: &Path) -> PathBuf {
        data_dir.join(paths::MODELS_DIR_NAME).join(MODEL_DIR_NAME)
    }

    /// The installed model directory, searched like the other data files.
    pub fn find_model_dir(data_dir: Option<&Path>) -> Option<PathBuf> {
        let relative = Path::new(paths::MODELS_DIR_NAME).join(MODEL_DIR_NAME);
        paths::find_data_path(&relative.to_string_lossy(), data_dir)
    }

    /// Load the model and tokenizer from a local directory.
    pub fn load_from_dir(model_dir: &Path) -> Result<Self> {
        if !model_dir.is_dir() {
            return Err(SearchError::unavailable(
                RESOURCE,
                format!("model directory not found: {}", model_dir.display()),
            ));
        }

        let missing: Vec<&str> = Self::required_model_files()
            .iter()
            .copied()
            .filter(|name| !model_dir.join(name).is_file())
            .collect();
        if !missing.is_empty() {
            return Err(SearchError::unavailable(
                RESOURCE,
                format!(
                    "model files missing in {}: {}",
                    model_dir.display(),
                    missing.join(", ")
                ),
            ));
        }

        let tokenizer_files = TokenizerFiles {
            tokenizer_file: read_required(model_dir, TOKENIZER_JSON)?,
            config_file: read_required(model_dir, CONFIG_JSON)?,
            special_tokens_map_file: read_required(model_dir, SPECIAL_TOKENS_JSON)?,
            tokenizer_config_file: read_required(model_dir, TOKENIZER_CONFIG_JSON)?,
        };
        let model = UserDefinedEmbeddingModel::new(read_required(model_dir, MODEL_FILE)?, tokenizer_files)
            .with_pooling(Pooling::Mean);

        let model = TextEmbedding::try_new_from_user_defined(model, InitOptionsUserDefined::new())
            .map_err(|e| SearchError::unavailable(RESOURCE, format!("fastembed init failed: {e}")))?;

        log::info!("Loaded embedding model from {}", model_dir.display());
        Ok(Self {
            model: Mutex::new(model),
            model_dir: model_dir.to_path_buf(),
        })
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    fn embed_texts(&self, texts: Vec<&str>) -> Result<Vec<Vec<f32>>> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| SearchError::unavailable(RESOURCE, "fastembed lock poisoned"))?;

        let embeddings = model
            .embed(texts, None)
            .map_err(|e| SearchError::unavailable(RESOURCE, format!("fastembed embed failed: {e}")))?;

        if let Some(bad) = embeddings.iter().find(|e| e.len() != EMBEDDING_DIMENSION) {
            return Err(SearchError::unavailable(
                RESOURCE,
                format!(
                    "dimension mismatch: expected {EMBEDDING_DIMENSION}, got {}",
                    bad.len()
                ),
            ));
        }
        Ok(embeddings)
    }
}

fn read_required(model_dir: &Path, name: &str) -> Result<Vec<u8>> {
    let path = model_dir.join(name);
    fs::read(&path).map_err(|e| {
        SearchError::unavailable(RESOURCE, format!("unable to read {}: {e}", path.display()))
    })
}

impl Embedder for FastEmbedEmbedder {
    /// Empty text embeds to the zero vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Ok(vec![0.0; EMBEDDING_DIMENSION]);
        }
        self.embed_texts(vec![text])?
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::unavailable(RESOURCE, "fastembed returned no embedding"))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.iter().any(|t| t.trim().is_empty()) {
            return texts.iter().map(|t| self.embed(t)).collect();
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.embed_texts(texts.to_vec())
    }

    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }
}

impl std::fmt::Debug for FastEmbedEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FastEmbedEmbedder")
            .field("model_dir", &self.model_dir)
            .field("dimension", &EMBEDDING_DIMENSION)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load_err(dir: &Path) -> SearchError {
        match FastEmbedEmbedder::load_from_dir(dir) {
            Ok(_) => panic!("expected missing-model error"),
            Err(err) => err,
        }
    }

    #[test]
    fn test_missing_directory_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_err(&temp_dir.path().join("absent"));
        assert!(err.is_dependency_unavailable());
        assert!(err.to_string().contains("model directory not found"));
    }

    #[test]
    fn test_missing_files_listed() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(MODEL_FILE), b"onnx").unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_JSON), b"{}").unwrap();

        let err = load_err(temp_dir.path());
        assert!(err.is_dependency_unavailable());
        let message = err.to_string();
        assert!(message.contains(TOKENIZER_JSON));
        assert!(!message.contains(MODEL_FILE));
    }

    #[test]
    fn test_default_model_dir() {
        let dir = FastEmbedEmbedder::default_model_dir(Path::new("/srv/pharmacy"));
        assert_eq!(dir, Path::new("/srv/pharmacy/models/all-MiniLM-L6-v2"));
    }
}
