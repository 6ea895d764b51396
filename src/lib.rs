//! # Reputation Monitor
//!
//! Review sentiment pipeline for a brand reputation dashboard: picks one
//! month of scraped reviews, classifies them in a single batch and
//! summarises the labels for charting.
//!
//! ## Modules
//!
//! - `data` - Record store and month-window filtering
//! - `sentiment` - Classifier capability, lexicon backend, aggregation
//! - `pipeline` - Filter → classify → aggregate orchestration
//! - `report` - Text rendering for the CLI
//! - `config` / `logging` - Application settings and tracing setup
//!
//! ## Example Usage
//!
//! ```no_run
//! use reputation_monitor::{RecordStore, SentimentPipeline, TimeWindow, AppConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::default();
//!     let store = RecordStore::load(&config.store.path)?;
//!     let pipeline = SentimentPipeline::from_config(&config)?;
//!
//!     let report = pipeline.run(&store, TimeWindow::parse(2023, "Jan")?)?;
//!     for agg in &report.aggregates {
//!         println!("{}: {} ({:.4})", agg.label, agg.count, agg.mean_confidence);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod sentiment;

// Re-exports for convenience
pub use config::{load_config, AppConfig, ClassifierSettings, ConfigError, LoggingSettings, StoreSettings};
pub use data::{filter_reviews, Product, RecordStore, Review, Testimonial, TimeWindow, WindowSelection};
pub use error::{ClassifierError, PipelineError, Result};
pub use pipeline::{
    run_sentiment_pipeline, run_sentiment_pipeline_async, PipelineReport, PipelineStage, SentimentPipeline,
};
pub use sentiment::{
    ClassifiedReview, ClassifierAdapter, LexiconClassifier, Prediction, SentimentAggregate,
    SentimentAggregator, SentimentClassifier, SentimentLabel,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    /// Decimal places kept on classifier confidence
    pub const CONFIDENCE_PRECISION: u32 = 4;

    /// Largest precision an `f64` confidence can be rounded to
    pub const MAX_CONFIDENCE_PRECISION: u32 = 15;

    /// Classification timeout for async runs (milliseconds)
    pub const CLASSIFY_TIMEOUT_MS: u64 = 30_000;

    /// Year the dashboard monitors when none is given
    pub const DEFAULT_YEAR: i32 = 2023;
}
