//! # Review Lexicon
//!
//! Customer review sentiment lexicon for rule-based scoring.

use std::collections::{HashMap, HashSet};

/// Review sentiment lexicon
///
/// Contains word-sentiment mappings for product and service reviews.
pub struct ReviewLexicon {
    /// Word to sentiment score mapping
    words: HashMap<String, f64>,
    /// Negation words
    negations: HashSet<String>,
    /// Intensifier words
    intensifiers: HashMap<String, f64>,
}

impl Default for ReviewLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewLexicon {
    /// Create a new review lexicon with default words
    pub fn new() -> Self {
        let positive_words = [
            ("great", 0.8),
            ("good", 0.6),
            ("excellent", 0.9),
            ("amazing", 0.9),
            ("awesome", 0.8),
            ("fantastic", 0.9),
            ("wonderful", 0.8),
            ("perfect", 0.9),
            ("love", 0.8),
            ("loved", 0.8),
            ("loves", 0.8),
            ("like", 0.4),
            ("liked", 0.4),
            ("best", 0.8),
            ("nice", 0.5),
            ("happy", 0.6),
            ("pleased", 0.6),
            ("satisfied", 0.6),
            ("recommend", 0.7),
            ("recommended", 0.7),
            ("delicious", 0.8),
            ("tasty", 0.6),
            ("fresh", 0.4),
            ("fast", 0.4),
            ("quick", 0.4),
            ("easy", 0.4),
            ("friendly", 0.5),
            ("helpful", 0.6),
            ("beautiful", 0.7),
            ("quality", 0.3),
            ("worth", 0.5),
            ("fine", 0.2),
            ("ok", 0.1),
            ("okay", 0.1),
            ("decent", 0.3),
        ];

        let negative_words = [
            ("bad", -0.7),
            ("terrible", -0.9),
            ("awful", -0.9),
            ("horrible", -0.9),
            ("worst", -0.9),
            ("poor", -0.6),
            ("hate", -0.8),
            ("hated", -0.8),
            ("disappointed", -0.7),
            ("disappointing", -0.7),
            ("broken", -0.7),
            ("broke", -0.6),
            ("damaged", -0.7),
            ("defective", -0.8),
            ("useless", -0.8),
            ("waste", -0.8),
            ("refund", -0.5),
            ("return", -0.3),
            ("returned", -0.4),
            ("slow", -0.4),
            ("late", -0.4),
            ("never", -0.2),
            ("stale", -0.6),
            ("bland", -0.4),
            ("overpriced", -0.6),
            ("expensive", -0.3),
            ("cheap", -0.3),
            ("rude", -0.7),
            ("problem", -0.5),
            ("issue", -0.4),
            ("fail", -0.7),
            ("failed", -0.7),
            ("scam", -0.9),
            ("fake", -0.8),
            ("meh", -0.2),
        ];

        let words = positive_words
            .into_iter()
            .chain(negative_words)
            .map(|(word, score)| (word.to_string(), score))
            .collect();

        let negations = [
            "not", "no", "cannot", "cant", "can't", "don't", "dont", "doesn't", "doesnt",
            "didn't", "didnt", "won't", "wont", "wouldn't", "wouldnt", "isn't", "isnt",
            "wasn't", "wasnt", "aren't", "arent", "weren't", "werent", "hardly", "barely",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let intensifiers = [
            ("very", 1.5),
            ("really", 1.4),
            ("so", 1.3),
            ("super", 1.5),
            ("extremely", 2.0),
            ("absolutely", 1.8),
            ("totally", 1.5),
            ("highly", 1.5),
            ("incredibly", 1.8),
            ("quite", 1.2),
            ("slightly", 0.5),
            ("somewhat", 0.7),
            ("kinda", 0.7),
        ]
        .into_iter()
        .map(|(word, mult)| (word.to_string(), mult))
        .collect();

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    /// Get sentiment score for a word
    pub fn get_score(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    /// Check if a word is a negation
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(&word.to_lowercase())
    }

    /// Get intensifier multiplier
    pub fn get_intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(&word.to_lowercase()).copied()
    }

    /// Score a sequence of lowercase tokens
    ///
    /// Negation flips the next sentiment word; an intensifier scales it.
    /// Both reset on any unmatched word.
    pub fn analyze<S: AsRef<str>>(&self, tokens: &[S]) -> LexiconResult {
        let mut scores: Vec<f64> = Vec::new();
        let mut matched_words: Vec<(String, f64)> = Vec::new();

        let mut negate_next = false;
        let mut intensifier: f64 = 1.0;

        for token in tokens {
            let word = token.as_ref();

            if self.is_negation(word) {
                negate_next = true;
                continue;
            }

            if let Some(mult) = self.get_intensifier(word) {
                intensifier *= mult;
                continue;
            }

            if let Some(mut score) = self.get_score(word) {
                if negate_next {
                    // "not great" is weaker than "bad"
                    score = -score * 0.8;
                    negate_next = false;
                }
                score *= intensifier;
                intensifier = 1.0;

                scores.push(score);
                matched_words.push((word.to_string(), score));
            } else {
                negate_next = false;
                intensifier = 1.0;
            }
        }

        let sentiment_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        LexiconResult {
            score: sentiment_score.clamp(-1.0, 1.0),
            matched_words,
            word_count: scores.len(),
        }
    }

    /// Add a custom word to the lexicon
    pub fn add_word(&mut self, word: &str, score: f64) {
        self.words.insert(word.to_lowercase(), score);
    }
}

/// Result from lexicon-based analysis
#[derive(Debug, Clone)]
pub struct LexiconResult {
    /// Overall sentiment score (-1 to 1)
    pub score: f64,
    /// Words that matched with their scores
    pub matched_words: Vec<(String, f64)>,
    /// Number of sentiment words found
    pub word_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn test_word_scores() {
        let lexicon = ReviewLexicon::new();
        assert!(lexicon.get_score("great").unwrap() > 0.0);
        assert!(lexicon.get_score("Terrible").unwrap() < 0.0);
        assert!(lexicon.get_score("chair").is_none());
    }

    #[test]
    fn test_negation_handling() {
        let lexicon = ReviewLexicon::new();
        let positive = lexicon.analyze(&tokens("the candy is good"));
        let negated = lexicon.analyze(&tokens("the candy is not good"));
        assert!(positive.score > 0.0);
        assert!(negated.score < 0.0);
    }

    #[test]
    fn test_negated_negative_turns_positive() {
        let lexicon = ReviewLexicon::new();
        assert!(lexicon.analyze(&tokens("not bad")).score > 0.0);
    }

    #[test]
    fn test_intensifier_handling() {
        let lexicon = ReviewLexicon::new();
        let normal = lexicon.analyze(&tokens("shipping was slow"));
        let intensified = lexicon.analyze(&tokens("shipping was very slow"));
        assert!(intensified.score < normal.score);
    }

    #[test]
    fn test_score_is_clamped() {
        let lexicon = ReviewLexicon::new();
        let result = lexicon.analyze(&tokens("absolutely extremely perfect"));
        assert_eq!(result.score, 1.0);
        assert_eq!(result.word_count, 1);
    }

    #[test]
    fn test_no_sentiment_words() {
        let lexicon = ReviewLexicon::new();
        let result = lexicon.analyze(&tokens("arrived on tuesday"));
        assert_eq!(result.score, 0.0);
        assert!(result.matched_words.is_empty());
    }

    #[test]
    fn test_custom_word() {
        let mut lexicon = ReviewLexicon::new();
        lexicon.add_word("Yummy", 0.7);
        assert_eq!(lexicon.get_score("yummy"), Some(0.7));
    }
}
