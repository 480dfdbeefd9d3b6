//! Query Pipeline
//!
//! Orchestrates the full query preprocessing flow:
//! 1. Truncate over-long input
//! 2. Apply typo correction
//! 3. Normalize (tokenize, drop stopwords, lemmatize)
//! 4. Apply synonym expansion
//!
//! The corrected text, not the expanded one, is what gets embedded for ranking.

use std::sync::Arc;

use serde::Serialize;

use super::config::PreprocessConfig;
use super::lemmatizer::Lemmatizer;
use super::lexicon::{LexicalDatabase, Lexicon};
use super::normalize::QueryNormalizer;
use super::paths;
use super::synonyms::{SynonymExpander, SynonymTable};
use super::typo::{Correction, SpellingCorrector};
use crate::core::error::{Result, SearchError};

/// Complete query preprocessing pipeline.
#[derive(Debug)]
pub struct QueryPipeline {
    corrector: SpellingCorrector,
    normalizer: QueryNormalizer,
    expander: SynonymExpander,
    config: PreprocessConfig,
}

/// Result of preprocessing a raw query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedQuery {
    /// Original user input
    pub original: String,
    /// Whether the input was cut to `max_query_chars`
    pub truncated: bool,
    /// Typo-corrected version
    pub corrected: String,
    /// Individual corrections made
    pub corrections: Vec<Correction>,
    /// Stopword-free lemmas of the corrected text
    pub normalized: String,
    /// Synonym-expanded terms used for candidate filtering
    pub expanded: String,
    /// Text to embed for ranking (corrected, not expanded)
    pub text_for_embedding: String,
}

impl QueryPipeline {
    /// Create pipeline with the given configuration, loading every language
    /// resource it names.
    pub fn new(config: PreprocessConfig) -> Result<Self> {
        let corrector = SpellingCorrector::new(config.typo.clone())?;

        let lexicon_path = config
            .synonyms
            .lexicon_path
            .clone()
            .or_else(|| paths::find_lexicon(None));
        let lexicon = match lexicon_path {
            Some(path) => Lexicon::from_file(&path)?,
            None if config.synonyms.enabled => {
                return Err(SearchError::unavailable(
                    "lexical database",
                    format!(
                        "{} not found; generate it with `build-lexicon`",
                        paths::LEXICON_FILENAME
                    ),
                ));
            }
            None => Lexicon::default(),
        };

        let mut exceptions = Lemmatizer::bundled_exceptions()?;
        if let Some(path) = &config.normalize.lemma_exceptions_path {
            exceptions.extend(Lemmatizer::load_exceptions(path)?);
        }

        let vocabulary: Vec<String> = lexicon
            .lemma_names()
            .chain(corrector.vocabulary())
            .map(str::to_string)
            .collect();
        if vocabulary.is_empty() {
            return Err(SearchError::unavailable(
                "lemma vocabulary",
                "no lexicon or dictionary terms loaded",
            ));
        }

        let normalizer = QueryNormalizer::new(Lemmatizer::new(exceptions, vocabulary))
            .with_extra_stopwords(&config.normalize.extra_stopwords);

        let mut table = if config.synonyms.use_default_medical_synonyms {
            SynonymTable::medical()
        } else {
            SynonymTable::default()
        };
        if let Some(path) = &config.synonyms.synonyms_path {
            table.merge_file(path)?;
        }

        let expander = SynonymExpander::new(table, Arc::new(lexicon) as Arc<dyn LexicalDatabase>)
            .with_enabled(config.synonyms.enabled);

        log::debug!(
            "Query pipeline ready: {} dictionary terms, {} synonym phrases",
            corrector.term_count(),
            expander.table().len()
        );

        Ok(Self {
            corrector,
            normalizer,
            expander,
            config,
        })
    }

    /// Create pipeline with explicit components.
    pub fn from_components(
        corrector: SpellingCorrector,
        normalizer: QueryNormalizer,
        expander: SynonymExpander,
        config: PreprocessConfig,
    ) -> Self {
        Self {
            corrector,
            normalizer,
            expander,
            config,
        }
    }

    /// Process a raw user query through the full pipeline.
    pub fn process(&self, raw_query: &str) -> Result<ProcessedQuery> {
        let (input, truncated) = truncate_chars(raw_query, self.config.max_query_chars);
        if truncated {
            log::warn!(
                "Query truncated to {} characters (was {})",
                self.config.max_query_chars,
                raw_query.chars().count()
            );
        }

        let (corrected, corrections) = self.corrector.correct_query(input)?;
        let normalized = self.normalizer.normalize(&corrected);
        let expanded = self.expander.expand(&normalized);

        log::debug!(
            "Processed query {:?}: corrected={:?} normalized={:?}",
            raw_query,
            corrected,
            normalized
        );

        Ok(ProcessedQuery {
            original: raw_query.to_string(),
            truncated,
            text_for_embedding: corrected.clone(),
            corrected,
            corrections,
            normalized,
            expanded,
        })
    }

    pub fn correct(&self, query: &str) -> Result<String> {
        self.corrector.correct(query)
    }

    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    pub fn expand(&self, normalized: &str) -> String {
        self.expander.expand(normalized)
    }

    /// Add a protected word that should never be corrected
    pub fn add_protected_word(&mut self, word: &str) {
        self.corrector.add_protected_word(word);
    }

    pub fn corrector(&self) -> &SpellingCorrector {
        &self.corrector
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }
}

impl ProcessedQuery {
    /// Check if any corrections were made
    pub fn has_corrections(&self) -> bool {
        !self.corrections.is_empty()
    }

    /// Get a summary of corrections for display
    pub fn corrections_summary(&self) -> Option<String> {
        if self.corrections.is_empty() {
            return None;
        }

        let corrections: Vec<String> = self
            .corrections
            .iter()
            .map(|c| format!("{} → {}", c.original, c.corrected))
            .collect();

        Some(corrections.join(", "))
    }
}

/// Cut `text` to at most `max_chars` characters on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}
