//! # Sentiment Aggregator
//!
//! Reduces classified reviews to per-label counts and mean confidence.

use super::classifier::{Prediction, SentimentLabel};
use crate::data::Review;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A review with the label assigned to its text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedReview {
    pub date: String,
    pub text: String,
    pub sentiment_label: SentimentLabel,
    pub confidence: f64,
}

impl ClassifiedReview {
    /// Attach a prediction to the review it was made for
    pub fn new(review: &Review, prediction: Prediction) -> Self {
        Self {
            date: review.date.clone(),
            text: review.text.clone(),
            sentiment_label: prediction.label,
            confidence: prediction.confidence,
        }
    }
}

/// Per-label summary over a classified window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAggregate {
    pub label: SentimentLabel,
    pub count: usize,
    pub mean_confidence: f64,
}

/// Groups classified reviews by label
#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentAggregator;

impl SentimentAggregator {
    pub fn new() -> Self {
        Self
    }

    /// One row per distinct label, in order of first appearance.
    ///
    /// Empty input yields no rows.
    pub fn aggregate(&self, classified: &[ClassifiedReview]) -> Vec<SentimentAggregate> {
        let mut index: HashMap<&SentimentLabel, usize> = HashMap::new();
        let mut groups: Vec<(&SentimentLabel, usize, f64)> = Vec::new(); // label, count, confidence sum

        for review in classified {
            let slot = *index.entry(&review.sentiment_label).or_insert_with(|| {
                groups.push((&review.sentiment_label, 0, 0.0));
                groups.len() - 1
            });
            let group = &mut groups[slot];
            group.1 += 1;
            group.2 += review.confidence;
        }

        groups
            .into_iter()
            .map(|(label, count, sum)| SentimentAggregate {
                label: label.clone(),
                count,
                mean_confidence: sum / count as f64,
            })
            .collect()
    }

    /// Total number of reviews behind a set of aggregates
    pub fn total_count(aggregates: &[SentimentAggregate]) -> usize {
        aggregates.iter().map(|a| a.count).sum()
    }
}
