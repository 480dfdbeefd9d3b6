//! Data Path Resolution
//!
//! Locates language data at runtime. The large resources (the SymSpell English
//! frequency dictionary, the WordNet synset export and the embedding model) are
//! installed separately, either into the configured data directory or into
//! `data/` of the source tree during development. Catalog corpus dictionaries
//! are generated into the data directory.

use std::path::{Path, PathBuf};

/// English frequency dictionary filename (82,765 entries from SymSpell)
pub const ENGLISH_DICT_FILENAME: &str = "frequency_dictionary_en_82_765.txt";

/// Catalog corpus dictionary (generated from item names and descriptions)
pub const CORPUS_DICT_FILENAME: &str = "catalog_corpus.txt";

/// Synsets exported from the WordNet database by `build-lexicon`
pub const LEXICON_FILENAME: &str = "wordnet_synsets.txt";

/// Irregular noun forms exported from WordNet's `noun.exc`
pub const LEMMA_EXCEPTIONS_FILENAME: &str = "wordnet_noun_exceptions.txt";

/// Directory holding local embedding models
pub const MODELS_DIR_NAME: &str = "models";

/// Application directory name under the platform data dir
const APP_DIR_NAME: &str = "pharmacy-search";

/// `~/.local/share/pharmacy-search/` on Linux, the platform equivalent elsewhere.
pub fn get_user_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Resolves an installed data file or directory.
///
/// Checks locations in order:
/// 1. The configured data directory (`<dir>/<name>`, then `<dir>/data/<name>`)
/// 2. Development paths (`data/`, `CARGO_MANIFEST_DIR/data`)
/// 3. The user data directory
pub fn find_data_path(name: &str, data_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = data_dir {
        for path in [dir.join(name), dir.join("data").join(name)] {
            if path.exists() {
                return Some(path);
            }
        }
    }

    let mut dev_paths = vec![PathBuf::from("data").join(name)];
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        dev_paths.push(PathBuf::from(manifest_dir).join("data").join(name));
    }
    if let Some(path) = dev_paths.into_iter().find(|path| path.exists()) {
        return Some(path);
    }

    get_user_data_dir()
        .map(|dir| dir.join(name))
        .filter(|path| path.exists())
}

/// The SymSpell English dictionary, if installed.
pub fn find_english_dictionary(data_dir: Option<&Path>) -> Option<PathBuf> {
    find_data_path(ENGLISH_DICT_FILENAME, data_dir)
}

/// The WordNet synset export, if one has been generated.
pub fn find_lexicon(data_dir: Option<&Path>) -> Option<PathBuf> {
    find_data_path(LEXICON_FILENAME, data_dir)
}

/// Where the corpus dictionary for `data_dir` is written.
pub fn corpus_dictionary_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CORPUS_DICT_FILENAME)
}

/// The corpus dictionary under `data_dir`, if one has been generated.
pub fn find_corpus_dictionary(data_dir: &Path) -> Option<PathBuf> {
    let path = corpus_dictionary_path(data_dir);
    path.is_file().then_some(path)
}
