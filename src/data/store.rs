//! # Record Store
//!
//! Read-only view over the scraped products, testimonials and reviews
//! persisted by the ingestion job as a single JSON document.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Scraped product listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product name
    pub name: String,
    /// Listed price, numeric or as scraped
    pub price: Price,
}

/// Product price. Scrapers emit either a number or the raw label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Label(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(value) => write!(f, "{value:.2}"),
            Price::Label(label) => f.write_str(label),
        }
    }
}

/// Customer testimonial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Display name of the customer
    pub user: String,
    /// Testimonial body
    pub content: String,
}

/// Dated customer review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Review body
    pub text: String,
}

impl Review {
    /// Create a new review
    pub fn new(date: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            text: text.into(),
        }
    }
}

/// The three record collections. The pipeline only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordStore {
    pub products: Vec<Product>,
    pub testimonials: Vec<Testimonial>,
    pub reviews: Vec<Review>,
}

impl RecordStore {
    /// Build a store from in-memory collections
    pub fn new(products: Vec<Product>, testimonials: Vec<Testimonial>, reviews: Vec<Review>) -> Self {
        Self {
            products,
            testimonials,
            reviews,
        }
        .without_blank_reviews()
    }

    /// Store holding only reviews
    pub fn from_reviews(reviews: Vec<Review>) -> Self {
        Self::new(Vec::new(), Vec::new(), reviews)
    }

    /// Load the persisted store.
    ///
    /// A missing or unparsable document is reported as `StoreUnavailable`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |reason: String| PipelineError::StoreUnavailable {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let store = Self::from_json_str(&content).map_err(|e| unavailable(e.to_string()))?;

        debug!(
            path = %path.display(),
            products = store.products.len(),
            testimonials = store.testimonials.len(),
            reviews = store.reviews.len(),
            "loaded record store"
        );
        Ok(store)
    }

    /// Parse a store document
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        let store: RecordStore = serde_json::from_str(content)?;
        Ok(store.without_blank_reviews())
    }

    fn without_blank_reviews(mut self) -> Self {
        let before = self.reviews.len();
        self.reviews.retain(|r| !r.text.trim().is_empty());
        let dropped = before - self.reviews.len();
        if dropped > 0 {
            warn!(dropped, "ignoring reviews with empty text");
        }
        self
    }

    /// Check whether the store has no records at all
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.testimonials.is_empty() && self.reviews.is_empty()
    }
}
