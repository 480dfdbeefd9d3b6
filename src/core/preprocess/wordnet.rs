//! WordNet Import
//!
//! Converts the WordNet database files (`data.noun`, `data.verb`, `data.adj`,
//! `data.adv` and `noun.exc` from the WNDB distribution) into the synset and
//! lemma exception files the lexicon and lemmatizer load.
//!
//! A WNDB data line reads:
//!
//! ```text
//! 14353008 26 n 03 headache 0 head_ache 0 cephalalgia 0 003 @ ... | gloss
//! ```
//!
//! offset, lexicographer file, synset type, a two-digit hex word count, then
//! that many `word lex_id` pairs. Pointers and the gloss are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::lexicon::Synset;
use super::paths;
use crate::core::error::{Result, SearchError};

/// WNDB data files, in the order synsets are written
pub const DATA_FILES: [&str; 4] = ["data.noun", "data.verb", "data.adj", "data.adv"];

/// Irregular noun forms
pub const NOUN_EXCEPTIONS_FILE: &str = "noun.exc";

const RESOURCE: &str = "WordNet database";

/// Counts from one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub synsets: usize,
    pub exceptions: usize,
    pub lexicon_path: PathBuf,
    pub exceptions_path: PathBuf,
}

/// Writes WordNet synsets and noun exceptions into a data directory.
#[derive(Debug, Clone)]
pub struct WordNetImporter {
    wordnet_dir: PathBuf,
}

impl WordNetImporter {
    /// `wordnet_dir` is the WNDB `dict/` directory.
    pub fn new(wordnet_dir: impl Into<PathBuf>) -> Self {
        Self {
            wordnet_dir: wordnet_dir.into(),
        }
    }

    /// Import into `output_dir` under the file names the search resources
    /// look for.
    pub fn import_into(&self, output_dir: &Path) -> Result<ImportSummary> {
        std::fs::create_dir_all(output_dir)?;
        let lexicon_path = output_dir.join(paths::LEXICON_FILENAME);
        let exceptions_path = output_dir.join(paths::LEMMA_EXCEPTIONS_FILENAME);

        let synsets = self.write_synsets(&lexicon_path)?;
        let exceptions = self.write_noun_exceptions(&exceptions_path)?;

        log::info!(
            "Imported {} synsets and {} noun exceptions from {}",
            synsets,
            exceptions,
            self.wordnet_dir.display()
        );
        Ok(ImportSummary {
            synsets,
            exceptions,
            lexicon_path,
            exceptions_path,
        })
    }

    /// Write every synset as a `pos\tlemmas` line. Returns the synset count.
    pub fn write_synsets(&self, output_path: &Path) -> Result<usize> {
        let mut out = BufWriter::new(File::create(output_path)?);
        writeln!(out, "# Synsets imported from {}", self.wordnet_dir.display())?;

        let mut written = 0;
        for name in DATA_FILES {
            let reader = self.open(name)?;
            for line in reader.lines() {
                let line = line?;
                if let Some(synset) = parse_data_line(&line) {
                    writeln!(out, "{}\t{}", synset.pos, synset.lemmas.join(" "))?;
                    written += 1;
                }
            }
        }
        out.flush()?;

        if written == 0 {
            return Err(SearchError::unavailable(
                RESOURCE,
                format!("no synsets found in {}", self.wordnet_dir.display()),
            ));
        }
        Ok(written)
    }

    /// Write `inflected lemma` pairs from `noun.exc`, keeping the first base
    /// form where WordNet lists several.
    pub fn write_noun_exceptions(&self, output_path: &Path) -> Result<usize> {
        let reader = self.open(NOUN_EXCEPTIONS_FILE)?;
        let mut out = BufWriter::new(File::create(output_path)?);
        writeln!(out, "# Irregular noun forms: <inflected> <lemma>")?;

        let mut written = 0;
        for line in reader.lines() {
            let line = line?;
            let mut parts = line.split_whitespace();
            if let (Some(inflected), Some(lemma)) = (parts.next(), parts.next()) {
                writeln!(out, "{inflected} {lemma}")?;
                written += 1;
            }
        }
        out.flush()?;
        Ok(written)
    }

    fn open(&self, name: &str) -> Result<BufReader<File>> {
        let path = self.wordnet_dir.join(name);
        File::open(&path)
            .map(BufReader::new)
            .map_err(|e| SearchError::unavailable(RESOURCE, format!("{}: {e}", path.display())))
    }
}

/// Parse one WNDB data line. License header lines (leading spaces) and
/// malformed lines give `None`.
pub fn parse_data_line(line: &str) -> Option<Synset> {
    if line.starts_with(' ') {
        return None;
    }

    let mut fields = line.split(' ');
    let _offset = fields.next()?;
    let _lex_filenum = fields.next()?;
    let pos = fields.next()?;
    let word_count = usize::from_str_radix(fields.next()?, 16).ok()?;

    let mut lemmas = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        let word = fields.next()?;
        let _lex_id = fields.next()?;
        let lemma = strip_adjective_marker(word);
        if !lemmas.iter().any(|l| l == lemma) {
            lemmas.push(lemma.to_string());
        }
    }

    (!lemmas.is_empty()).then(|| Synset {
        pos: pos.to_string(),
        lemmas,
    })
}

/// Adjectives may carry a syntactic marker: `galore(ip)`, `elect(p)`.
fn strip_adjective_marker(word: &str) -> &str {
    match word.find('(') {
        Some(idx) if word.ends_with(')') => &word[..idx],
        _ => word,
    }
}
