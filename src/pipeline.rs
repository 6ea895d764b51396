//! # Review Sentiment Pipeline
//!
//! Filter a month of reviews, classify them in one batch, aggregate by label.
//!
//! ```text
//! FILTERING ──empty──▶ EMPTY
//!     │
//!     ▼
//! CLASSIFYING ──error/timeout──▶ FAILED
//!     │
//!     ▼
//! AGGREGATING ──▶ DONE
//! ```
//!
//! Nothing is retried and nothing is cached between runs.

use crate::config::AppConfig;
use crate::data::{filter_reviews, RecordStore, TimeWindow, WindowSelection};
use crate::error::{PipelineError, Result};
use crate::sentiment::{
    shared_classifier, ClassifiedReview, ClassifierAdapter, Prediction, SentimentAggregate,
    SentimentAggregator,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pipeline state for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Filtering,
    Classifying,
    Aggregating,
    Done,
    Empty,
    Failed,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Filtering => "FILTERING",
            PipelineStage::Classifying => "CLASSIFYING",
            PipelineStage::Aggregating => "AGGREGATING",
            PipelineStage::Done => "DONE",
            PipelineStage::Empty => "EMPTY",
            PipelineStage::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Done | PipelineStage::Empty | PipelineStage::Failed)
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub window: TimeWindow,
    /// Rows for table display, in store order
    pub classified: Vec<ClassifiedReview>,
    /// Rows for charting, one per label
    pub aggregates: Vec<SentimentAggregate>,
    /// Reviews skipped for an unparsable date
    pub malformed: usize,
}

/// Runs the filter → classify → aggregate sequence
#[derive(Debug, Clone)]
pub struct SentimentPipeline {
    classifier: ClassifierAdapter,
    aggregator: SentimentAggregator,
    timeout: Option<Duration>,
}

impl SentimentPipeline {
    /// Create a pipeline over an injected classifier
    pub fn new(classifier: ClassifierAdapter) -> Self {
        Self {
            classifier,
            aggregator: SentimentAggregator::new(),
            timeout: None,
        }
    }

    /// Bound the classification step of [`run_async`](Self::run_async)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Pipeline over the shared classifier, configured from `config`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let classifier = shared_classifier(&config.classifier)?;
        let pipeline = Self::new(classifier);
        Ok(match config.classifier.timeout_ms {
            0 => pipeline,
            ms => pipeline.with_timeout(Duration::from_millis(ms)),
        })
    }

    pub fn classifier(&self) -> &ClassifierAdapter {
        &self.classifier
    }

    /// Run the pipeline, blocking on classification
    pub fn run(&self, store: &RecordStore, window: TimeWindow) -> Result<PipelineReport> {
        let selection = self.select(store, window)?;

        transition(window, PipelineStage::Classifying);
        let predictions = self
            .classifier
            .classify(&selection.texts())
            .map_err(|e| self.failed(window, e.into()))?;

        self.assemble(selection, predictions)
    }

    /// Run the pipeline with classification on the blocking pool.
    ///
    /// Classification is the only await point. A timeout counts as the
    /// classifier being unavailable.
    pub async fn run_async(&self, store: &RecordStore, window: TimeWindow) -> Result<PipelineReport> {
        let selection = self.select(store, window)?;

        transition(window, PipelineStage::Classifying);
        let predictions = self
            .classifier
            .classify_timed(selection.texts(), self.timeout)
            .await
            .map_err(|e| self.failed(window, e.into()))?;

        self.assemble(selection, predictions)
    }

    fn select<'a>(&self, store: &'a RecordStore, window: TimeWindow) -> Result<WindowSelection<'a>> {
        transition(window, PipelineStage::Filtering);
        let selection = filter_reviews(&store.reviews, window);
        if selection.malformed > 0 {
            warn!(%window, malformed = selection.malformed, "reviews excluded for malformed dates");
        }

        if selection.is_empty() {
            transition(window, PipelineStage::Empty);
            return Err(PipelineError::EmptyWindow { window });
        }
        debug!(%window, selected = selection.len(), "selected reviews");
        Ok(selection)
    }

    fn assemble(&self, selection: WindowSelection<'_>, predictions: Vec<Prediction>) -> Result<PipelineReport> {
        let window = selection.window;
        if predictions.len() != selection.len() {
            let err = PipelineError::ClassifierUnavailable(format!(
                "classifier returned {} predictions for {} reviews",
                predictions.len(),
                selection.len()
            ));
            return Err(self.failed(window, err));
        }

        transition(window, PipelineStage::Aggregating);
        let classified: Vec<ClassifiedReview> = selection
            .reviews
            .iter()
            .zip(predictions)
            .map(|(review, prediction)| ClassifiedReview::new(review, prediction))
            .collect();
        let aggregates = self.aggregator.aggregate(&classified);

        transition(window, PipelineStage::Done);
        info!(%window, reviews = classified.len(), labels = aggregates.len(), "sentiment pipeline done");

        Ok(PipelineReport {
            window,
            classified,
            aggregates,
            malformed: selection.malformed,
        })
    }

    fn failed(&self, window: TimeWindow, err: PipelineError) -> PipelineError {
        transition(window, PipelineStage::Failed);
        warn!(%window, backend = self.classifier.backend().name(), error = %err, "classification failed");
        err
    }
}

fn transition(window: TimeWindow, stage: PipelineStage) {
    debug!(%window, stage = stage.as_str(), "pipeline stage");
}

/// Load the configured store and run the pipeline once.
///
/// Fails with `StoreUnavailable` when the store cannot be read.
pub fn run_sentiment_pipeline(config: &AppConfig, window: TimeWindow) -> Result<PipelineReport> {
    let store = RecordStore::load(&config.store.path)?;
    SentimentPipeline::from_config(config)?.run(&store, window)
}

/// Async variant of [`run_sentiment_pipeline`] honouring the configured timeout
pub async fn run_sentiment_pipeline_async(config: &AppConfig, window: TimeWindow) -> Result<PipelineReport> {
    let store = RecordStore::load(&config.store.path)?;
    SentimentPipeline::from_config(config)?.run_async(&store, window).await
}
