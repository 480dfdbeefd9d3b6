//! Search Error Types
//!
//! Every pipeline stage returns [`SearchError`], so errors raised by the
//! corrector, normalizer, expander or ranker reach the caller unchanged.

use thiserror::Error;

/// Search pipeline errors
#[derive(Error, Debug)]
pub enum SearchError {
    /// A language resource (spelling dictionary, lexical database, lemma
    /// vocabulary, embedding model) failed to load or is not ready.
    #[error("{resource} unavailable: {reason}")]
    DependencyUnavailable { resource: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// Shorthand for [`SearchError::DependencyUnavailable`].
    pub fn unavailable(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        SearchError::DependencyUnavailable {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// True when the failure is a missing or broken language resource.
    ///
    /// Callers map this to a "service unavailable" response.
    pub fn is_dependency_unavailable(&self) -> bool {
        matches!(self, SearchError::DependencyUnavailable { .. })
    }
}

impl From<toml::de::Error> for SearchError {
    fn from(e: toml::de::Error) -> Self {
        SearchError::Config(e.to_string())
    }
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let err = SearchError::unavailable("spelling dictionary", "no terms loaded");
        assert_eq!(err.to_string(), "spelling dictionary unavailable: no terms loaded");
        assert!(err.is_dependency_unavailable());
    }

    #[test]
    fn test_other_kinds_are_not_unavailable() {
        let err = SearchError::InvalidInput("category name is empty".to_string());
        assert!(!err.is_dependency_unavailable());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!SearchError::from(io).is_dependency_unavailable());
    }
}
