//! Typo Correction using SymSpell
//!
//! Provides spelling correction for search queries using the SymSpell algorithm.
//! The 82,765-word SymSpell English frequency dictionary is the base layer. The
//! pharmacy vocabulary shipped with the crate and corpus dictionaries generated
//! from the catalog are layered on top.

use std::collections::HashSet;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use symspell::{SymSpell, UnicodeStringStrategy, Verbosity};

use super::config::TypoConfig;
use super::paths;
use crate::core::error::{Result, SearchError};

/// Pharmacy terms compiled into the binary (`term count` per line). Counts
/// add to the English dictionary's counts for terms it already has.
pub const PHARMACY_TERMS: &str = include_str!("../../../data/pharmacy_terms.txt");

const RESOURCE: &str = "spelling dictionary";

/// Runs of letters. Digits, underscores, punctuation and whitespace between
/// them are copied through untouched.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\W\d_]+").expect("valid regex"));

/// A correction made to a word in the query
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Correction {
    /// Original word from the query
    pub original: String,
    /// Corrected word
    pub corrected: String,
    /// Edit distance between original and corrected
    pub edit_distance: usize,
}

/// Spelling correction engine.
///
/// Dictionaries are layered in order:
/// 1. SymSpell English frequency dictionary
/// 2. Bundled pharmacy vocabulary
/// 3. Catalog corpus dictionary (generated from item text, boosted counts)
pub struct SpellingCorrector {
    engine: SymSpell<UnicodeStringStrategy>,
    /// Known terms, used to leave correctly spelled words alone
    vocabulary: HashSet<String>,
    protected_words: HashSet<String>,
    config: TypoConfig,
}

impl std::fmt::Debug for SpellingCorrector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpellingCorrector")
            .field("terms", &self.vocabulary.len())
            .field("protected_words", &self.protected_words.len())
            .field("enabled", &self.config.enabled)
            .finish()
    }
}

impl SpellingCorrector {
    /// Initialize with the given configuration.
    ///
    /// A configured dictionary path that does not exist or cannot be read is
    /// reported as [`SearchError::DependencyUnavailable`], as is an enabled
    /// corrector with no English dictionary installed.
    pub fn new(config: TypoConfig) -> Result<Self> {
        let mut corrector = Self::empty_with(config);
        corrector.load_configured()?;
        log::debug!("Spelling corrector ready with {} terms", corrector.term_count());
        Ok(corrector)
    }

    /// Create a corrector with default settings and no dictionaries loaded.
    ///
    /// Every correction attempt on it fails as unavailable.
    pub fn new_empty() -> Self {
        Self::empty_with(TypoConfig::default())
    }

    fn empty_with(config: TypoConfig) -> Self {
        let protected_words = config
            .protected_words
            .iter()
            .map(|w| w.to_lowercase())
            .collect();
        Self {
            engine: SymSpell::default(),
            vocabulary: HashSet::new(),
            protected_words,
            config,
        }
    }

    fn load_configured(&mut self) -> Result<()> {
        let english = self
            .config
            .english_dict_path
            .clone()
            .or_else(|| paths::find_english_dictionary(None));

        match english {
            Some(path) => {
                self.load_dictionary_file(&path)?;
            }
            None if self.config.enabled => {
                return Err(SearchError::unavailable(
                    RESOURCE,
                    format!(
                        "{} not found; install it into the data directory",
                        paths::ENGLISH_DICT_FILENAME
                    ),
                ));
            }
            None => log::debug!("No English dictionary installed, correction is disabled"),
        }

        if self.config.use_pharmacy_terms {
            self.load_pharmacy_terms();
        }

        if let Some(path) = self.config.corpus_dict_path.clone() {
            self.load_dictionary_file(&path)?;
        }
        Ok(())
    }

    /// Layer the bundled pharmacy vocabulary on top of what is loaded.
    pub fn load_pharmacy_terms(&mut self) -> usize {
        self.load_dictionary_str(PHARMACY_TERMS)
    }

    /// Layer a dictionary file on top of what is already loaded.
    pub fn load_dictionary_file(&mut self, path: &Path) -> Result<usize> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SearchError::unavailable(RESOURCE, format!("{}: {e}", path.display()))
        })?;
        let loaded = self.load_dictionary_str(&contents);
        log::info!("Loaded {} dictionary terms from {}", loaded, path.display());
        Ok(loaded)
    }

    /// Load `term count` lines. Malformed lines are skipped. A term that is
    /// already loaded has its count increased.
    pub fn load_dictionary_str(&mut self, contents: &str) -> usize {
        let mut loaded = 0;
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let (Some(term), Some(count)) = (parts.next(), parts.next()) else {
                continue;
            };
            if count.parse::<i64>().is_err() {
                continue;
            }
            let term = term.to_lowercase();
            let entry = format!("{term} {count}");
            // false only means the term was already known; its count still adds
            self.engine.load_dictionary_line(&entry, 0, 1, " ");
            self.vocabulary.insert(term);
            loaded += 1;
        }
        loaded
    }

    /// Number of distinct terms loaded
    pub fn term_count(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_loaded(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Dictionary terms, used as lemma vocabulary by the normalizer.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(String::as_str)
    }

    /// Correct a full search query, returning only the corrected string.
    pub fn correct(&self, query: &str) -> Result<String> {
        self.correct_query(query).map(|(corrected, _)| corrected)
    }

    /// Correct a full search query.
    ///
    /// Returns the corrected query string and a list of corrections made.
    pub fn correct_query(&self, query: &str) -> Result<(String, Vec<Correction>)> {
        if !self.config.enabled {
            return Ok((query.to_string(), Vec::new()));
        }
        if !self.is_loaded() {
            return Err(SearchError::unavailable(RESOURCE, "no dictionary loaded"));
        }

        let mut corrections = Vec::new();
        let corrected = WORD_RE.replace_all(query, |caps: &regex::Captures| {
            let word = &caps[0];
            match self.correct_word(word) {
                Some(correction) => {
                    let replacement = correction.corrected.clone();
                    corrections.push(correction);
                    replacement
                }
                None => word.to_string(),
            }
        });

        if !corrections.is_empty() {
            log::debug!("Corrected {:?} -> {:?}", query, corrected);
        }
        Ok((corrected.into_owned(), corrections))
    }

    /// Correct a single word if it needs correction.
    ///
    /// Returns None if the word should not be changed (protected, too short, or already correct).
    fn correct_word(&self, word: &str) -> Option<Correction> {
        let word_lower = word.to_lowercase();
        let word_len = word_lower.chars().count();

        if self.protected_words.contains(&word_lower) || self.vocabulary.contains(&word_lower) {
            return None;
        }

        let max_edit_distance = if word_len < self.config.min_word_size_one_typo {
            return None;
        } else if word_len < self.config.min_word_size_two_typos {
            1
        } else {
            2
        };

        let suggestions = self
            .engine
            .lookup(&word_lower, Verbosity::Top, max_edit_distance);

        let best = suggestions
            .into_iter()
            .min_by(|a, b| a.distance.cmp(&b.distance).then(b.count.cmp(&a.count)))?;

        if best.term == word_lower || best.distance == 0 {
            return None;
        }

        Some(Correction {
            original: word.to_string(),
            corrected: best.term,
            edit_distance: best.distance as usize,
        })
    }

    /// Add a protected word that should never be corrected
    pub fn add_protected_word(&mut self, word: &str) {
        self.protected_words.insert(word.to_lowercase());
    }

    /// Check if a word is protected from correction
    pub fn is_protected(&self, word: &str) -> bool {
        self.protected_words.contains(&word.to_lowercase())
    }
}
