//! Query Preprocessing
//!
//! Language-side stages of product search: spelling correction, normalization
//! and synonym expansion, plus the generators for their data files: the corpus
//! dictionary built from catalog text and the WordNet synset import.

pub mod config;
pub mod dictionary;
pub mod lemmatizer;
pub mod lexicon;
pub mod normalize;
pub mod paths;
pub mod pipeline;
pub mod synonyms;
pub mod typo;
pub mod wordnet;

pub use config::{NormalizeConfig, PreprocessConfig, SynonymConfig, TypoConfig};
pub use dictionary::DictionaryGenerator;
pub use lemmatizer::Lemmatizer;
pub use lexicon::{LexicalDatabase, Lexicon};
pub use normalize::{tokenize, QueryNormalizer};
pub use pipeline::{ProcessedQuery, QueryPipeline};
pub use synonyms::{SynonymExpander, SynonymTable};
pub use typo::{Correction, SpellingCorrector};
pub use wordnet::{ImportSummary, WordNetImporter};
