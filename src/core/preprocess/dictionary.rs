//! Corpus Dictionary Generation
//!
//! Generates frequency dictionaries from catalog text (item names,
//! descriptions, category names) for use with SymSpell. Layering one over the
//! English dictionary lets the corrector fix misspelled brand names.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::catalog::Item;
use crate::core::error::Result;

/// Generates frequency dictionaries from catalog content.
#[derive(Debug, Clone)]
pub struct DictionaryGenerator {
    /// Frequency multiplier for corpus terms (default: 10x)
    pub domain_boost: u64,
    /// Minimum word length to include, in characters (default: 2)
    pub min_word_length: usize,
    /// Minimum frequency to include (default: 1)
    pub min_frequency: u64,
}

impl Default for DictionaryGenerator {
    fn default() -> Self {
        Self {
            domain_boost: 10,
            min_word_length: 2,
            min_frequency: 1,
        }
    }
}

impl DictionaryGenerator {
    pub fn new(domain_boost: u64, min_word_length: usize, min_frequency: u64) -> Self {
        Self {
            domain_boost,
            min_word_length,
            min_frequency,
        }
    }

    /// Build a corpus dictionary from every item's searchable text.
    pub fn build_from_catalog(&self, items: &[Item], output_path: &Path) -> Result<usize> {
        let texts = items.iter().flat_map(|item| {
            [
                Some(item.name.as_str()),
                item.description.as_deref(),
                Some(item.category.name.as_str()),
            ]
            .into_iter()
            .flatten()
        });
        let written = self.build_from_texts(texts, output_path)?;
        log::info!(
            "Corpus dictionary built from {} items: {} terms -> {}",
            items.len(),
            written,
            output_path.display()
        );
        Ok(written)
    }

    /// Count terms across `texts` and write the dictionary. Returns the
    /// number of terms written.
    pub fn build_from_texts<'a>(
        &self,
        texts: impl IntoIterator<Item = &'a str>,
        output_path: &Path,
    ) -> Result<usize> {
        let mut counts = BTreeMap::new();
        for text in texts {
            self.count_terms(text, &mut counts);
        }
        self.write_dictionary(&counts, output_path)
    }

    /// Letter runs of at least `min_word_length` characters, lowercased.
    fn count_terms(&self, text: &str, counts: &mut BTreeMap<String, u64>) {
        text.split(|c: char| !c.is_alphabetic())
            .filter(|word| word.chars().count() >= self.min_word_length)
            .for_each(|word| *counts.entry(word.to_lowercase()).or_default() += 1);
    }

    /// `term count` lines in term order, counts multiplied by the boost.
    fn write_dictionary(&self, counts: &BTreeMap<String, u64>, output_path: &Path) -> Result<usize> {
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut out = BufWriter::new(File::create(output_path)?);
        let mut written = 0;
        for (term, count) in counts.iter().filter(|(_, c)| **c >= self.min_frequency) {
            writeln!(out, "{term} {}", count * self.domain_boost)?;
            written += 1;
        }
        out.flush()?;

        Ok(written)
    }
}
