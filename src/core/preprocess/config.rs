//! Preprocessing Configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths;

/// Default upper bound on query length, in characters.
pub const DEFAULT_MAX_QUERY_CHARS: usize = 256;

/// Configuration for the whole query preprocessing pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub typo: TypoConfig,
    pub normalize: NormalizeConfig,
    pub synonyms: SynonymConfig,
    /// Longer queries are truncated before correction
    pub max_query_chars: usize,
}

impl PreprocessConfig {
    /// Fill unset resource paths with whatever is installed under `data_dir`.
    ///
    /// Paths already set are left alone, so explicit configuration always wins.
    pub fn resolve_data_files(&mut self, data_dir: &Path) {
        let dir = Some(data_dir);
        if self.typo.english_dict_path.is_none() {
            self.typo.english_dict_path = paths::find_english_dictionary(dir);
        }
        if self.typo.corpus_dict_path.is_none() {
            self.typo.corpus_dict_path = paths::find_corpus_dictionary(data_dir);
        }
        if self.synonyms.lexicon_path.is_none() {
            self.synonyms.lexicon_path = paths::find_lexicon(dir);
        }
        if self.normalize.lemma_exceptions_path.is_none() {
            self.normalize.lemma_exceptions_path =
                paths::find_data_path(paths::LEMMA_EXCEPTIONS_FILENAME, dir);
        }
    }
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            typo: TypoConfig::default(),
            normalize: NormalizeConfig::default(),
            synonyms: SynonymConfig::default(),
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
        }
    }
}

/// Spelling correction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypoConfig {
    /// When false the corrector returns its input unchanged
    pub enabled: bool,
    /// Layer the pharmacy vocabulary shipped with the crate over the
    /// English dictionary
    pub use_pharmacy_terms: bool,
    /// SymSpell English frequency dictionary (`term count` per line). When
    /// unset, `frequency_dictionary_en_82_765.txt` is looked up in the data
    /// directories.
    pub english_dict_path: Option<PathBuf>,
    /// Catalog corpus dictionary produced by `DictionaryGenerator`
    pub corpus_dict_path: Option<PathBuf>,
    /// Words shorter than this are never corrected
    pub min_word_size_one_typo: usize,
    /// Words at least this long may be corrected by two edits
    pub min_word_size_two_typos: usize,
    /// Words that must never be corrected (brand names, abbreviations)
    pub protected_words: Vec<String>,
}

impl Default for TypoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            use_pharmacy_terms: true,
            english_dict_path: None,
            corpus_dict_path: None,
            min_word_size_one_typo: 3,
            min_word_size_two_typos: 5,
            protected_words: Vec::new(),
        }
    }
}

/// Tokenizer, stopword and lemmatizer settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Extra stopwords on top of the standard English list
    pub extra_stopwords: Vec<String>,
    /// Extra irregular forms (`inflected lemma` per line)
    pub lemma_exceptions_path: Option<PathBuf>,
}

/// Synonym expansion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynonymConfig {
    /// When false, expansion returns the normalized words unchanged
    pub enabled: bool,
    /// Start from the built-in medical synonym table
    pub use_default_medical_synonyms: bool,
    /// TOML file of extra canonical phrases merged into the table
    pub synonyms_path: Option<PathBuf>,
    /// Synset file exported by `build-lexicon`. When unset, the export is
    /// looked up in the data directories.
    pub lexicon_path: Option<PathBuf>,
}

impl Default for SynonymConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            use_default_medical_synonyms: true,
            synonyms_path: None,
            lexicon_path: None,
        }
    }
}
