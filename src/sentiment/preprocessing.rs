//! # Text Preprocessing
//!
//! Cleans scraped review text before lexicon lookup.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Text preprocessor for review text
pub struct TextPreprocessor {
    /// Regex for URL removal
    url_regex: Regex,
    /// Regex for HTML entity/tag leftovers from scraping
    markup_regex: Regex,
    /// Anything that is not a letter, digit, apostrophe or whitespace
    punctuation_regex: Regex,
    /// Regex for multiple whitespace
    whitespace_regex: Regex,
}

impl Default for TextPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPreprocessor {
    /// Create a new text preprocessor
    pub fn new() -> Self {
        Self {
            url_regex: Regex::new(r"https?://\S+|www\.\S+").expect("static regex"),
            markup_regex: Regex::new(r"<[^>]*>|&[a-z]+;").expect("static regex"),
            punctuation_regex: Regex::new(r"[^\p{L}\p{N}'\s]+").expect("static regex"),
            whitespace_regex: Regex::new(r"\s+").expect("static regex"),
        }
    }

    /// Preprocess text for lexicon lookup
    ///
    /// Steps:
    /// 1. Unicode normalization
    /// 2. Remove URLs and markup leftovers
    /// 3. Convert to lowercase, folding curly apostrophes
    /// 4. Replace punctuation with spaces
    /// 5. Normalize whitespace
    pub fn preprocess(&self, text: &str) -> String {
        let normalized: String = text.nfc().collect();

        let no_urls = self.url_regex.replace_all(&normalized, " ");
        let no_markup = self.markup_regex.replace_all(&no_urls, " ");

        let lowercase = no_markup.to_lowercase().replace('\u{2019}', "'");
        let no_punct = self.punctuation_regex.replace_all(&lowercase, " ");

        let clean = self.whitespace_regex.replace_all(&no_punct, " ");
        clean.trim().to_string()
    }

    /// Tokenize preprocessed text into words
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.preprocess(text)
            .split_whitespace()
            .map(|word| word.trim_matches('\'').to_string())
            .filter(|word| !word.is_empty())
            .collect()
    }
}
