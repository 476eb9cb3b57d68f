use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static::lazy_static! {
    static ref DIACRITICS: Regex = Regex::new(r"\p{Diacritic}").expect("valid diacritic pattern");
    static ref TOKEN: Regex = Regex::new(r"\p{L}+\p{M}*|\p{N}+").expect("valid token pattern");
    static ref DEFAULT_STOPWORDS: Arc<HashSet<String>> = Arc::new(
        [
            "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
            "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
            "between", "both", "but", "by", "cannot", "could", "did", "do", "does", "doing",
            "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
            "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how",
            "i", "if", "in", "into", "is", "it", "its", "itself", "me", "more", "most", "my",
            "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or", "other",
            "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "she",
            "should", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
            "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
            "too", "under", "until", "up", "very", "was", "we", "were", "what", "when",
            "where", "which", "while", "who", "whom", "why", "with", "would", "you", "your",
            "yours", "yourself", "yourselves",
        ]
        .iter()
        .map(|w| w.to_string())
        .collect()
    );
}

/// Segmentation function: text in, ordered tokens out.
pub type Segmenter = Arc<dyn Fn(&str) -> Vec<String> + Send + Sync>;

/// Default segmentation.
///
/// Lowercases, applies NFKD, strips diacritics, then keeps maximal runs of
/// letters (optionally trailed by combining marks) or of numeric characters.
/// Everything else separates tokens.
pub fn default_segmenter(text: &str) -> Vec<String> {
    let decomposed: String = text.to_lowercase().nfkd().collect();
    let stripped = DIACRITICS.replace_all(&decomposed, "");
    TOKEN
        .find_iter(&stripped)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Set of tokens excluded after segmentation.
///
/// Matching is exact and case-sensitive; the default segmenter already
/// lowercases, so the default list is lowercase.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: Arc<HashSet<String>>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: Arc::new(words.into_iter().map(Into::into).collect()),
        }
    }

    /// Disables filtering.
    pub fn none() -> Self {
        Self {
            words: Arc::new(HashSet::new()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.words.len()
    }

    /// Remove stopwords
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        if self.words.is_empty() {
            return tokens;
        }
        tokens
            .into_iter()
            .filter(|t| !self.words.contains(t.as_str()))
            .collect()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self {
            words: Arc::clone(&DEFAULT_STOPWORDS),
        }
    }
}

/// Segmenter plus stopword filter: the full analysis pipeline.
#[derive(Clone)]
pub struct Tokenizer {
    segmenter: Segmenter,
    stop_words: StopWords,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            segmenter: Arc::new(default_segmenter),
            stop_words: StopWords::default(),
        }
    }

    pub fn with_parts(segmenter: Segmenter, stop_words: StopWords) -> Self {
        Self {
            segmenter,
            stop_words,
        }
    }

    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Full analysis pipeline
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let tokens = (self.segmenter)(text);
        self.stop_words.filter(tokens)
    }

    /// Analyze and return unique tokens (for indexing and querying)
    pub fn analyze_unique(&self, text: &str) -> HashSet<String> {
        self.analyze(text).into_iter().collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("stop_words", &self.stop_words.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment() {
        let tokens = default_segmenter("Hello, World! This is a test.");
        assert_eq!(tokens, vec!["hello", "world", "this", "is", "a", "test"]);
    }

    #[test]
    fn test_segment_empty() {
        assert!(default_segmenter("").is_empty());
        assert!(default_segmenter("   \t\n").is_empty());
        assert!(default_segmenter("...---!!!").is_empty());
    }

    #[test]
    fn test_segment_strips_diacritics() {
        let tokens = default_segmenter("Crème Brûlée at the Café");
        assert_eq!(tokens, vec!["creme", "brulee", "at", "the", "cafe"]);
    }

    #[test]
    fn test_segment_splits_letters_and_digits() {
        let tokens = default_segmenter("route66 v2.0");
        assert_eq!(tokens, vec!["route", "66", "v", "2", "0"]);
    }

    #[test]
    fn test_segment_compatibility_forms() {
        // NFKD folds the ligature and the full-width digits
        let tokens = default_segmenter("ﬁne １２３");
        assert_eq!(tokens, vec!["fine", "123"]);
    }

    #[test]
    fn test_segment_non_latin() {
        let tokens = default_segmenter("Привет, мир");
        assert_eq!(tokens, vec!["привет", "мир"]);
    }

    #[test]
    fn test_segment_strips_non_latin_diacritics() {
        // kana voicing mark, Arabic harakat, Hebrew niqqud, Devanagari virama
        assert_eq!(default_segmenter("がっこう"), vec!["かっこう"]);
        assert_eq!(default_segmenter("كَتَبَ"), vec!["كتب"]);
        assert_eq!(default_segmenter("שָׁלוֹם"), vec!["שלום"]);
        assert_eq!(default_segmenter("हिन्दी"), vec!["हि", "नदी"]);
    }

    #[test]
    fn test_analyze_filters_stopwords() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.analyze("The quick brown fox of the forest");
        assert_eq!(tokens, vec!["quick", "brown", "fox", "forest"]);
        assert!(tokenizer.analyze("the a of").is_empty());
    }

    #[test]
    fn test_custom_stopwords() {
        let tokenizer = Tokenizer::with_parts(Arc::new(default_segmenter), StopWords::new(["fox"]));
        let tokens = tokenizer.analyze("the fox");
        assert_eq!(tokens, vec!["the"]);

        let unfiltered = Tokenizer::with_parts(Arc::new(default_segmenter), StopWords::none());
        assert_eq!(unfiltered.analyze("the fox"), vec!["the", "fox"]);
    }

    #[test]
    fn test_stopwords_are_case_sensitive() {
        let upper = Tokenizer::with_parts(
            Arc::new(|s: &str| -> Vec<String> { s.split_whitespace().map(String::from).collect() }),
            StopWords::default(),
        );
        assert_eq!(upper.analyze("The the"), vec!["The"]);
    }

    #[test]
    fn test_analyze_unique() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.analyze_unique("apple Apple APPLE pie");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("apple"));
        assert!(tokens.contains("pie"));
    }
}
