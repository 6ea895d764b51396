//! Integration tests for the review sentiment pipeline

use reputation_monitor::{
    filter_reviews, run_sentiment_pipeline, AppConfig, ClassifierAdapter, ClassifierError,
    LexiconClassifier, PipelineError, Prediction, RecordStore, Review, SentimentAggregator,
    SentimentClassifier, SentimentLabel, SentimentPipeline, TimeWindow,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Backend replaying fixed predictions and counting calls
struct Scripted {
    predictions: Vec<Prediction>,
    calls: AtomicUsize,
}

impl Scripted {
    fn new(predictions: Vec<Prediction>) -> Arc<Self> {
        Arc::new(Self {
            predictions,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SentimentClassifier for Scripted {
    fn name(&self) -> &str {
        "scripted"
    }

    fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.predictions.iter().take(texts.len()).cloned().collect())
    }
}

/// Backend that always raises
struct Broken;

impl SentimentClassifier for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn classify(&self, _texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
        Err(ClassifierError::Unavailable("model artifact missing".to_string()))
    }
}

/// Backend that panics mid-batch
struct Panicking;

impl SentimentClassifier for Panicking {
    fn name(&self) -> &str {
        "panicking"
    }

    fn classify(&self, _texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
        panic!("model weights not loaded")
    }
}

fn scenario_store() -> RecordStore {
    RecordStore::from_reviews(vec![
        Review::new("2023-01-15", "great"),
        Review::new("2023-01-22", "bad"),
        Review::new("2023-05-10", "ok"),
    ])
}

fn lexicon_pipeline() -> SentimentPipeline {
    SentimentPipeline::new(ClassifierAdapter::new(Arc::new(LexiconClassifier::new())))
}

fn window(year: i32, month: u32) -> TimeWindow {
    TimeWindow::new(year, month).unwrap()
}

mod scenarios {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_january_window_selects_first_two() {
        let report = lexicon_pipeline().run(&scenario_store(), window(2023, 1)).unwrap();

        let rows: Vec<(&str, &str)> = report
            .classified
            .iter()
            .map(|r| (r.date.as_str(), r.text.as_str()))
            .collect();
        assert_eq!(rows, vec![("2023-01-15", "great"), ("2023-01-22", "bad")]);
        assert_eq!(SentimentAggregator::total_count(&report.aggregates), 2);
        assert_eq!(report.classified[0].sentiment_label, SentimentLabel::Positive);
        assert_eq!(report.classified[1].sentiment_label, SentimentLabel::Negative);
    }

    #[test]
    fn test_march_window_is_empty_and_never_classifies() {
        let backend = Scripted::new(vec![]);
        let pipeline = SentimentPipeline::new(ClassifierAdapter::new(backend.clone()));

        let err = pipeline.run(&scenario_store(), window(2023, 3)).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyWindow { window } if window.month() == 3));
        assert!(!err.is_failure());
        assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn test_classifier_failure_returns_no_partial_data() {
        let pipeline = SentimentPipeline::new(ClassifierAdapter::new(Arc::new(Broken)));

        let err = pipeline.run(&scenario_store(), window(2023, 1)).unwrap_err();
        match err {
            PipelineError::ClassifierUnavailable(msg) => assert!(msg.contains("model artifact missing")),
            other => panic!("expected ClassifierUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_backend_panic_is_classifier_failure() {
        let pipeline = SentimentPipeline::new(ClassifierAdapter::new(Arc::new(Panicking)));

        let err = pipeline.run(&scenario_store(), window(2023, 1)).unwrap_err();
        match err {
            PipelineError::ClassifierUnavailable(msg) => assert!(msg.contains("model weights not loaded")),
            other => panic!("expected ClassifierUnavailable, got {other:?}"),
        }

        let async_err = pipeline
            .run_async(&scenario_store(), window(2023, 1))
            .await
            .unwrap_err();
        assert!(matches!(async_err, PipelineError::ClassifierUnavailable(_)));
    }

    #[test]
    fn test_short_batch_is_classifier_failure() {
        // one prediction for two reviews
        let backend = Scripted::new(vec![Prediction::new("POSITIVE", 0.9)]);
        let pipeline = SentimentPipeline::new(ClassifierAdapter::new(backend));

        let err = pipeline.run(&scenario_store(), window(2023, 1)).unwrap_err();
        assert!(matches!(err, PipelineError::ClassifierUnavailable(_)));
    }

    #[test]
    fn test_two_positive_reviews_average_confidence() {
        let store = RecordStore::from_reviews(vec![
            Review::new("2023-04-01", "lovely"),
            Review::new("2023-04-02", "superb"),
        ]);
        let backend = Scripted::new(vec![
            Prediction::new("POSITIVE", 0.90),
            Prediction::new("POSITIVE", 0.80),
        ]);
        let pipeline = SentimentPipeline::new(ClassifierAdapter::new(backend));

        let report = pipeline.run(&store, window(2023, 4)).unwrap();
        assert_eq!(report.aggregates.len(), 1);
        assert_eq!(report.aggregates[0].label, SentimentLabel::Positive);
        assert_eq!(report.aggregates[0].count, 2);
        assert_relative_eq!(report.aggregates[0].mean_confidence, 0.85, epsilon = 1e-9);
    }

    #[test]
    fn test_rerun_is_identical() {
        let pipeline = lexicon_pipeline();
        let store = scenario_store();

        let first = pipeline.run(&store, window(2023, 1)).unwrap();
        let second = pipeline.run(&store, window(2023, 1)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_confidence_rounded_to_four_places() {
        let store = RecordStore::from_reviews(vec![Review::new("2023-06-01", "fine")]);
        let backend = Scripted::new(vec![Prediction::new("POSITIVE", 0.912_345_6)]);
        let pipeline = SentimentPipeline::new(ClassifierAdapter::new(backend));

        let report = pipeline.run(&store, window(2023, 6)).unwrap();
        assert_eq!(report.classified[0].confidence, 0.9123);
    }

    #[test]
    fn test_malformed_dates_are_reported() {
        let store = RecordStore::from_reviews(vec![
            Review::new("Jan 3, 2023", "great"),
            Review::new("2023-01-04", "good"),
        ]);
        let report = lexicon_pipeline().run(&store, window(2023, 1)).unwrap();
        assert_eq!(report.classified.len(), 1);
        assert_eq!(report.malformed, 1);
    }
}

mod store_loading {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_pipeline_from_store_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"products": [], "testimonials": [], "reviews": [
                {{"date": "2023-02-10", "text": "Absolutely loved the chocolate"}},
                {{"date": "2023-02-11", "text": "Box arrived damaged"}}
            ]}}"#
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.store.path = file.path().to_path_buf();

        let report = run_sentiment_pipeline(&config, window(2023, 2)).unwrap();
        assert_eq!(report.classified.len(), 2);
        assert_eq!(report.classified[1].sentiment_label, SentimentLabel::Negative);
    }

    #[test]
    fn test_missing_store_is_distinct_error() {
        let mut config = AppConfig::default();
        config.store.path = "/definitely/not/here/data.json".into();

        let err = run_sentiment_pipeline(&config, window(2023, 1)).unwrap_err();
        assert!(matches!(err, PipelineError::StoreUnavailable { .. }));
        assert!(err.is_failure());
    }
}

mod async_path {
    use super::*;
    use std::time::Duration;

    struct Stalled;

    impl SentimentClassifier for Stalled {
        fn name(&self) -> &str {
            "stalled"
        }

        fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>, ClassifierError> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(texts.iter().map(|_| Prediction::new("POSITIVE", 0.5)).collect())
        }
    }

    #[tokio::test]
    async fn test_timeout_is_classifier_unavailable() {
        let pipeline = SentimentPipeline::new(ClassifierAdapter::new(Arc::new(Stalled)))
            .with_timeout(Duration::from_millis(20));

        let err = pipeline.run_async(&scenario_store(), window(2023, 1)).await.unwrap_err();
        match err {
            PipelineError::ClassifierUnavailable(msg) => assert!(msg.contains("timed out")),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_concurrent_windows_are_independent() {
        let pipeline = lexicon_pipeline();
        let store = scenario_store();

        let (jan, may) = tokio::join!(
            pipeline.run_async(&store, window(2023, 1)),
            pipeline.run_async(&store, window(2023, 5)),
        );
        assert_eq!(jan.unwrap().classified.len(), 2);
        assert_eq!(may.unwrap().classified.len(), 1);
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn review_strategy() -> impl Strategy<Value = Review> {
        let date = prop_oneof![
            (2021i32..2025, 1u32..13, 1u32..29)
                .prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}")),
            "[a-z0-9/-]{0,10}",
        ];
        (date, "[a-z]{1,8}( [a-z]{1,8}){0,4}").prop_map(|(date, text)| Review::new(date, text))
    }

    proptest! {
        #[test]
        fn filter_is_exact_ordered_subset(
            reviews in proptest::collection::vec(review_strategy(), 0..40),
            year in 2021i32..2025,
            month in 1u32..13,
        ) {
            let selection = filter_reviews(&reviews, window(year, month));
            let prefix = format!("{year:04}-{month:02}");

            let expected: Vec<&Review> = reviews
                .iter()
                .filter(|r| r.date.len() >= 7 && r.date.starts_with(&prefix)
                    && (r.date.len() == 7 || r.date.as_bytes()[7] == b'-'))
                .collect();
            prop_assert_eq!(selection.reviews, expected);
        }

        #[test]
        fn aggregate_counts_sum_to_input(
            texts in proptest::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,4}", 1..30),
        ) {
            let reviews: Vec<Review> = texts.iter().map(|t| Review::new("2023-01-01", t.clone())).collect();
            let store = RecordStore::from_reviews(reviews);

            let report = lexicon_pipeline().run(&store, window(2023, 1)).unwrap();
            prop_assert_eq!(report.classified.len(), texts.len());
            prop_assert_eq!(SentimentAggregator::total_count(&report.aggregates), texts.len());
            for (row, text) in report.classified.iter().zip(&texts) {
                prop_assert_eq!(&row.text, text);
            }
        }

        #[test]
        fn mean_confidence_matches_group_mean(
            confidences in proptest::collection::vec(0.0f64..=1.0, 1..20),
        ) {
            let reviews: Vec<Review> = (0..confidences.len())
                .map(|i| Review::new("2023-07-01", format!("review {i}")))
                .collect();
            let store = RecordStore::from_reviews(reviews);
            let backend = Scripted::new(
                confidences.iter().map(|c| Prediction::new("POSITIVE", *c)).collect(),
            );
            let pipeline = SentimentPipeline::new(ClassifierAdapter::new(backend));

            let report = pipeline.run(&store, window(2023, 7)).unwrap();
            let rounded: Vec<f64> = report.classified.iter().map(|r| r.confidence).collect();
            let expected = rounded.iter().sum::<f64>() / rounded.len() as f64;

            prop_assert_eq!(report.aggregates.len(), 1);
            prop_assert!((report.aggregates[0].mean_confidence - expected).abs() < 1e-9);
        }
    }
}
