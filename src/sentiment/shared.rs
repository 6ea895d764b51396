//! Process-wide classification capability.
//!
//! Backends are expensive to build, so one instance is created on first use
//! and shared read-only by every pipeline run for the rest of the process.
//! Initialisation happens at most once: the first successful call to
//! [`shared_classifier`] or [`install_shared_classifier`] fixes the backend,
//! and settings passed to later calls only affect the adapter around it.

use super::analyzer::LexiconClassifier;
use super::classifier::{ClassifierAdapter, SentimentClassifier};
use crate::config::ClassifierSettings;
use crate::error::ClassifierError;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::info;

static SHARED: OnceLock<Arc<dyn SentimentClassifier>> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

/// Build a fresh backend from settings
pub fn build_backend(settings: &ClassifierSettings) -> Result<Arc<dyn SentimentClassifier>, ClassifierError> {
    match settings.backend.as_str() {
        "lexicon" => Ok(Arc::new(LexiconClassifier::new())),
        other => Err(ClassifierError::Unavailable(format!(
            "unknown classifier backend '{other}'"
        ))),
    }
}

/// Get the shared backend wrapped in an adapter, building it on first use
pub fn shared_classifier(settings: &ClassifierSettings) -> Result<ClassifierAdapter, ClassifierError> {
    let backend = match SHARED.get() {
        Some(backend) => Arc::clone(backend),
        None => {
            let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
            match SHARED.get() {
                Some(backend) => Arc::clone(backend),
                None => {
                    let built = build_backend(settings)?;
                    info!(backend = built.name(), "initialised shared sentiment classifier");
                    Arc::clone(SHARED.get_or_init(|| built))
                }
            }
        }
    };

    Ok(ClassifierAdapter::new(backend)
        .with_precision(settings.precision)?
        .with_serialized_batches(!settings.concurrent_batches))
}

/// Install a host-provided backend before first use.
///
/// Returns the backend back if one is already installed.
pub fn install_shared_classifier(
    backend: Arc<dyn SentimentClassifier>,
) -> Result<(), Arc<dyn SentimentClassifier>> {
    let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
    SHARED.set(backend)
}
