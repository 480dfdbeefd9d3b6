//! Noun Lemmatizer
//!
//! Morphy-style reduction of inflected nouns to their base form. Irregular
//! forms come from an exception table; regular plurals are handled by suffix
//! detachment, keeping only candidates that are known lemmas.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::core::error::{Result, SearchError};

/// Irregular forms compiled into the binary (`inflected lemma` per line)
pub const BUNDLED_EXCEPTIONS: &str = include_str!("../../../data/lemma_exceptions.txt");

/// Noun detachment rules, applied independently to the surface form.
const NOUN_SUFFIX_RULES: [(&str, &str); 8] = [
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    exceptions: HashMap<String, String>,
    vocabulary: HashSet<String>,
}

impl Lemmatizer {
    /// Build from exception pairs and the known-lemma vocabulary.
    ///
    /// Exception targets count as known even when absent from `vocabulary`.
    pub fn new(
        exceptions: HashMap<String, String>,
        vocabulary: impl IntoIterator<Item = String>,
    ) -> Self {
        let vocabulary = vocabulary.into_iter().map(|w| w.to_lowercase()).collect();
        Self {
            exceptions,
            vocabulary,
        }
    }

    /// Parse `inflected lemma` lines. `#` starts a comment.
    pub fn parse_exceptions(contents: &str) -> Result<HashMap<String, String>> {
        let mut exceptions = HashMap::new();
        for (line_no, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(inflected), Some(lemma), None) => {
                    exceptions.insert(inflected.to_lowercase(), lemma.to_lowercase());
                }
                _ => {
                    return Err(SearchError::unavailable(
                        "lemma exceptions",
                        format!("line {}: expected '<inflected> <lemma>'", line_no + 1),
                    ))
                }
            }
        }
        Ok(exceptions)
    }

    pub fn bundled_exceptions() -> Result<HashMap<String, String>> {
        Self::parse_exceptions(BUNDLED_EXCEPTIONS)
    }

    pub fn load_exceptions(path: &Path) -> Result<HashMap<String, String>> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SearchError::unavailable("lemma exceptions", format!("{}: {e}", path.display()))
        })?;
        Self::parse_exceptions(&contents)
    }

    pub fn extend_exceptions(&mut self, extra: HashMap<String, String>) {
        self.exceptions.extend(extra);
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Base form of a lowercase noun. Unknown words come back unchanged.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.exceptions.get(word) {
            let mut candidates = Vec::with_capacity(2);
            if self.is_known(word) {
                candidates.push(word);
            }
            candidates.push(lemma.as_str());
            return shortest(candidates).unwrap_or(word).to_string();
        }

        let mut candidates = Vec::new();
        if self.is_known(word) {
            candidates.push(word.to_string());
        }
        for (suffix, replacement) in NOUN_SUFFIX_RULES {
            if let Some(stem) = word.strip_suffix(suffix) {
                let candidate = format!("{stem}{replacement}");
                if !candidate.is_empty() && self.is_known(&candidate) {
                    candidates.push(candidate);
                }
            }
        }

        shortest(candidates.iter().map(String::as_str))
            .unwrap_or(word)
            .to_string()
    }
}

/// First of the shortest candidates, by character count.
fn shortest<'a>(candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    candidates.into_iter().min_by_key(|c| c.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lemmatizer() -> Lemmatizer {
        let vocabulary = [
            "medicine", "pain", "box", "church", "dish", "fox", "glass", "berry", "relief",
            "relieve", "headache", "aspirin", "bus", "alumnus",
        ]
        .into_iter()
        .map(String::from);
        Lemmatizer::new(Lemmatizer::bundled_exceptions().unwrap(), vocabulary)
    }

    #[rstest]
    #[case("medicines", "medicine")]
    #[case("pains", "pain")]
    #[case("boxes", "box")]
    #[case("churches", "church")]
    #[case("dishes", "dish")]
    #[case("glasses", "glass")]
    #[case("berries", "berry")]
    #[case("relieves", "relief")]
    #[case("feet", "foot")]
    #[case("children", "child")]
    #[case("headache", "headache")]
    #[case("aspirin", "aspirin")]
    #[case("bus", "bus")]
    #[case("zzzs", "zzzs")]
    fn test_lemmatize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(lemmatizer().lemmatize(input), expected);
    }

    #[test]
    fn test_lemmas_are_fixed_points() {
        let lemmatizer = lemmatizer();
        for word in ["medicine", "relief", "foot", "child", "box"] {
            assert_eq!(lemmatizer.lemmatize(word), word);
        }
    }

    #[test]
    fn test_parse_exceptions_rejects_bad_line() {
        let err = Lemmatizer::parse_exceptions("feet foot extra\n").unwrap_err();
        assert!(err.is_dependency_unavailable());
    }
}
