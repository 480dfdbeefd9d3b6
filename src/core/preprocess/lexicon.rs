//! Lexical Synonym Database
//!
//! WordNet-style synsets: groups of lemmas sharing one sense. The expander
//! adds every lemma of every synset that contains a query word, and the
//! lemmatizer uses the single-word lemmas as part of its known vocabulary.
//!
//! File format, one synset per line:
//!
//! ```text
//! # comment
//! n	headache head_ache cephalalgia
//! ```
//!
//! A part-of-speech tag, a tab, then space-separated lemmas. Multi-word
//! lemmas join their words with `_`. `build-lexicon` produces this file from
//! the WordNet database (see [`super::wordnet`]).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::core::error::{Result, SearchError};

const RESOURCE: &str = "lexical database";

/// Source of synonym sets for single words.
#[cfg_attr(test, mockall::automock)]
pub trait LexicalDatabase: Send + Sync {
    /// Every lemma of every synset containing `word`, with `_` rendered as a
    /// space. Empty when the word is unknown.
    fn synonyms(&self, word: &str) -> Vec<String>;

    /// Whether `word` is a known single-word lemma.
    fn is_lemma(&self, word: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synset {
    pub pos: String,
    pub lemmas: Vec<String>,
}

/// In-memory synset table with a lowercase word index.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    synsets: Vec<Synset>,
    index: HashMap<String, Vec<usize>>,
    lemmas: HashSet<String>,
}

impl Lexicon {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SearchError::unavailable(RESOURCE, format!("{}: {e}", path.display()))
        })?;
        let lexicon = Self::parse(&contents)?;
        log::info!(
            "Loaded {} synsets from {}",
            lexicon.synset_count(),
            path.display()
        );
        Ok(lexicon)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut lexicon = Self::default();
        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim_end();
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((pos, rest)) = line.split_once('\t') else {
                return Err(SearchError::unavailable(
                    RESOURCE,
                    format!("line {}: expected '<pos>\\t<lemmas>'", line_no + 1),
                ));
            };
            let lemmas: Vec<String> = rest.split_whitespace().map(str::to_string).collect();
            if lemmas.is_empty() {
                continue;
            }
            lexicon.push(Synset {
                pos: pos.trim().to_string(),
                lemmas,
            });
        }
        Ok(lexicon)
    }

    fn push(&mut self, synset: Synset) {
        let id = self.synsets.len();
        for lemma in &synset.lemmas {
            let key = lemma.to_lowercase();
            let ids = self.index.entry(key.clone()).or_default();
            if !ids.contains(&id) {
                ids.push(id);
            }
            if !key.contains('_') {
                self.lemmas.insert(key);
            }
        }
        self.synsets.push(synset);
    }

    /// Synsets whose lemmas include `word` (case-insensitive)
    pub fn synsets(&self, word: &str) -> impl Iterator<Item = &Synset> {
        self.index
            .get(&word.to_lowercase())
            .into_iter()
            .flatten()
            .map(|&id| &self.synsets[id])
    }

    /// Single-word lemmas, lowercased
    pub fn lemma_names(&self) -> impl Iterator<Item = &str> {
        self.lemmas.iter().map(String::as_str)
    }

    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }
}

impl LexicalDatabase for Lexicon {
    fn synonyms(&self, word: &str) -> Vec<String> {
        self.synsets(word)
            .flat_map(|synset| synset.lemmas.iter())
            .map(|lemma| lemma.replace('_', " "))
            .collect()
    }

    fn is_lemma(&self, word: &str) -> bool {
        self.lemmas.contains(word)
    }
}
