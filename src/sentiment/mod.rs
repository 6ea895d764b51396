//! # Sentiment Module
//!
//! Classification capability, built-in lexicon backend and per-label aggregation.

mod aggregator;
mod analyzer;
mod classifier;
mod lexicon;
mod preprocessing;
pub mod shared;

pub use aggregator::{ClassifiedReview, SentimentAggregate, SentimentAggregator};
pub use analyzer::LexiconClassifier;
pub use classifier::{round_confidence, ClassifierAdapter, Prediction, SentimentClassifier, SentimentLabel};
pub use lexicon::{LexiconResult, ReviewLexicon};
pub use preprocessing::TextPreprocessor;
pub use shared::{install_shared_classifier, shared_classifier};
