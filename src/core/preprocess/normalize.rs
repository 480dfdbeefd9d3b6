//! Query Normalization
//!
//! Turns free text into a canonical space-separated sequence of lowercase
//! lemmas: tokenize, lowercase, keep alphabetic tokens, drop stopwords,
//! lemmatize.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::lemmatizer::Lemmatizer;

/// Word-character runs, with every punctuation run as its own token.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+|[^\w\s]+").expect("valid regex"));

/// Standard English stopword list (NLTK corpus).
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Split text into word and punctuation tokens, in order.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str())
}

fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

pub struct QueryNormalizer {
    stopwords: HashSet<String>,
    lemmatizer: Lemmatizer,
}

impl QueryNormalizer {
    pub fn new(lemmatizer: Lemmatizer) -> Self {
        Self {
            stopwords: ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            lemmatizer,
        }
    }

    pub fn with_extra_stopwords(mut self, extra: &[String]) -> Self {
        self.stopwords.extend(extra.iter().map(|w| w.to_lowercase()));
        self
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }

    pub fn normalize(&self, text: &str) -> String {
        tokenize(text)
            .map(str::to_lowercase)
            .filter(|token| is_alphabetic(token) && !self.is_stopword(token))
            .map(|token| self.lemmatizer.lemmatize(&token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Debug for QueryNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryNormalizer")
            .field("stopwords", &self.stopwords.len())
            .field("vocabulary", &self.lemmatizer.vocabulary_size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn normalizer() -> QueryNormalizer {
        let vocabulary = ["medicine", "pain", "relief", "headache", "ibuprofen", "head", "hurt"]
            .into_iter()
            .map(String::from);
        QueryNormalizer::new(Lemmatizer::new(
            Lemmatizer::bundled_exceptions().unwrap(),
            vocabulary,
        ))
    }

    #[test]
    fn test_tokenize_splits_punctuation() {
        let tokens: Vec<_> = tokenize("Ibuprofen! 200mg, don't").collect();
        assert_eq!(tokens, vec!["Ibuprofen", "!", "200mg", ",", "don", "'", "t"]);
    }

    #[test]
    fn test_stopword_list_size() {
        assert_eq!(ENGLISH_STOPWORDS.len(), 179);
    }

    #[rstest]
    #[case("medicines", "medicine")]
    #[case("relieves pains", "relief pain")]
    #[case("the", "")]
    #[case("", "")]
    #[case("Ibuprofen!", "ibuprofen")]
    #[case("ibuproFEN", "ibuprofen")]
    #[case("for the headache", "headache")]
    #[case("500mg aspirin 2x", "aspirin")]
    #[case("head hurts", "head hurt")]
    fn test_normalize(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalizer().normalize(input), expected);
    }

    #[test]
    fn test_extra_stopwords() {
        let normalizer = normalizer().with_extra_stopwords(&["Medicine".to_string()]);
        assert_eq!(normalizer.normalize("medicine for pain"), "pain");
    }
}
