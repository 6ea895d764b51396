//! # Sentiment Classifier
//!
//! Batch classification capability and the adapter the pipeline talks to.
//!
//! The adapter guarantees positional correspondence: prediction `i` belongs
//! to text `i`. A backend that returns a different number of predictions is
//! treated as failed rather than partially trusted.

use crate::error::ClassifierError;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// Single global admission point for backends that cannot serve concurrent batches.
static ADMISSION: Mutex<()> = Mutex::new(());

/// Classifier-assigned sentiment category
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SentimentLabel {
    Positive,
    Negative,
    /// Any other label the deployed backend emits
    Other(String),
}

impl SentimentLabel {
    /// Get string representation
    pub fn as_str(&self) -> &str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Other(label) => label,
        }
    }
}

impl From<&str> for SentimentLabel {
    fn from(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("positive") {
            SentimentLabel::Positive
        } else if raw.eq_ignore_ascii_case("negative") {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Other(raw.to_string())
        }
    }
}

impl From<String> for SentimentLabel {
    fn from(raw: String) -> Self {
        SentimentLabel::from(raw.as_str())
    }
}

impl From<SentimentLabel> for String {
    fn from(label: SentimentLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: SentimentLabel,
    /// Self-reported score for `label`, in [0, 1]
    pub confidence: f64,
}

impl Prediction {
    pub fn new(label: impl Into<SentimentLabel>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// A batch sentiment classification capability.
///
/// Implementations must be deterministic for a given batch and return one
/// prediction per input text, in input order.
pub trait SentimentClassifier: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Classify a batch of texts
    fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError>;

    /// Whether several batches may run at once against this backend
    fn supports_concurrent_batches(&self) -> bool {
        true
    }
}

/// Round `value` to `precision` decimal places.
///
/// Callers keep `precision` at or below [`crate::defaults::MAX_CONFIDENCE_PRECISION`];
/// larger factors overflow to infinity and the result becomes NaN.
pub fn round_confidence(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Adapter enforcing the batch contract on top of a backend
#[derive(Clone)]
pub struct ClassifierAdapter {
    backend: Arc<dyn SentimentClassifier>,
    precision: u32,
    serialize_batches: bool,
}

impl fmt::Debug for ClassifierAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierAdapter")
            .field("backend", &self.backend.name())
            .field("precision", &self.precision)
            .field("serialize_batches", &self.serialize_batches)
            .finish()
    }
}

impl ClassifierAdapter {
    /// Wrap a backend with the default precision
    pub fn new(backend: Arc<dyn SentimentClassifier>) -> Self {
        let serialize_batches = !backend.supports_concurrent_batches();
        Self {
            backend,
            precision: crate::defaults::CONFIDENCE_PRECISION,
            serialize_batches,
        }
    }

    /// Set confidence rounding precision
    pub fn with_precision(mut self, precision: u32) -> Result<Self, ClassifierError> {
        let max = crate::defaults::MAX_CONFIDENCE_PRECISION;
        if precision > max {
            return Err(ClassifierError::InvalidPrecision { precision, max });
        }
        self.precision = precision;
        Ok(self)
    }

    /// Force every batch through the global admission gate
    pub fn with_serialized_batches(mut self, serialize: bool) -> Self {
        self.serialize_batches = serialize || !self.backend.supports_concurrent_batches();
        self
    }

    /// Underlying backend
    pub fn backend(&self) -> &Arc<dyn SentimentClassifier> {
        &self.backend
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Classify a batch, one prediction per text in input order.
    ///
    /// An empty batch returns an empty result without calling the backend.
    pub fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let raw = if self.serialize_batches {
            let _admitted = ADMISSION.lock().unwrap_or_else(PoisonError::into_inner);
            self.call_backend(texts)?
        } else {
            self.call_backend(texts)?
        };

        if raw.len() != texts.len() {
            return Err(ClassifierError::LengthMismatch {
                expected: texts.len(),
                actual: raw.len(),
            });
        }

        let predictions = raw
            .into_iter()
            .enumerate()
            .map(|(index, p)| {
                if !p.confidence.is_finite() || !(0.0..=1.0).contains(&p.confidence) {
                    return Err(ClassifierError::InvalidConfidence {
                        index,
                        value: p.confidence,
                    });
                }
                Ok(Prediction {
                    label: p.label,
                    confidence: round_confidence(p.confidence, self.precision),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(backend = self.backend.name(), batch = texts.len(), "classified batch");
        Ok(predictions)
    }

    /// Run the backend, turning a panic into a classifier failure
    fn call_backend(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.backend.classify(texts))).unwrap_or_else(|payload| {
            Err(ClassifierError::Failed(format!(
                "{} panicked: {}",
                self.backend.name(),
                panic_message(payload.as_ref())
            )))
        })
    }

    /// Classify on the blocking pool, giving up after `timeout`.
    ///
    /// A timed-out batch keeps running on its worker thread; its result is discarded.
    pub async fn classify_timed(
        &self,
        texts: Vec<String>,
        timeout: Option<Duration>,
    ) -> Result<Vec<Prediction>, ClassifierError> {
        let adapter = self.clone();
        let task = tokio::task::spawn_blocking(move || adapter.classify(&texts));

        let joined = match timeout {
            Some(limit) => tokio::time::timeout(limit, task)
                .await
                .map_err(|_| ClassifierError::Timeout {
                    after_ms: limit.as_millis() as u64,
                })?,
            None => task.await,
        };

        joined.map_err(|e| ClassifierError::Failed(format!("classifier task aborted: {e}")))?
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
