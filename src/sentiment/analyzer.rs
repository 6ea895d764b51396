//! # Lexicon Classifier
//!
//! Built-in deterministic backend combining the preprocessor and the review lexicon.

use super::classifier::{Prediction, SentimentClassifier, SentimentLabel};
use super::lexicon::{LexiconResult, ReviewLexicon};
use super::preprocessing::TextPreprocessor;
use crate::error::ClassifierError;
use tracing::debug;

/// Binary POSITIVE/NEGATIVE classifier over the review lexicon
pub struct LexiconClassifier {
    /// Text preprocessor
    preprocessor: TextPreprocessor,
    /// Review sentiment lexicon
    lexicon: ReviewLexicon,
}

impl Default for LexiconClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconClassifier {
    /// Create a classifier with the default lexicon
    pub fn new() -> Self {
        Self::with_lexicon(ReviewLexicon::new())
    }

    /// Create a classifier over a custom lexicon
    pub fn with_lexicon(lexicon: ReviewLexicon) -> Self {
        Self {
            preprocessor: TextPreprocessor::new(),
            lexicon,
        }
    }

    /// Classify a single text
    pub fn predict(&self, text: &str) -> Prediction {
        let tokens = self.preprocessor.tokenize(text);
        let result = self.lexicon.analyze(&tokens);
        debug!(
            score = result.score,
            matched = ?result.matched_words,
            tokens = tokens.len(),
            "lexicon scored review"
        );

        let label = if result.score < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Positive
        };

        // Confidence grows with score strength and with how much of the text was recognised
        let word_coverage = if tokens.is_empty() {
            0.0
        } else {
            (result.word_count as f64 / tokens.len() as f64).min(1.0)
        };
        let score_strength = result.score.abs();
        let confidence = (0.5 + 0.15 * word_coverage + 0.35 * score_strength).min(0.99);

        Prediction::new(label, confidence)
    }

    /// Lexicon hits behind a prediction, for inspecting a label
    pub fn explain(&self, text: &str) -> LexiconResult {
        self.lexicon.analyze(&self.preprocessor.tokenize(text))
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
        Ok(texts.iter().map(|text| self.predict(text)).collect())
    }
}
