//! External classifier seam.
//!
//! The classifier is a black box that receives still frames and a prompt and
//! answers with free text that should contain one JSON object. Implementations
//! resolve to `None` instead of failing: an unavailable, misconfigured or slow
//! classifier only removes the AI signal from an analysis.

pub mod gemini;
pub mod request;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

pub use gemini::GeminiClassifier;
pub use request::{ClassifierRequest, Frame, CLASSIFICATION_PROMPT, MAX_FRAMES};

/// A vision/language model that classifies clip frames.
#[async_trait]
pub trait VideoClassifier: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Raw response text, or `None` when no usable answer was obtained.
    ///
    /// Implementations bound their own latency.
    async fn classify(&self, request: &ClassifierRequest) -> Option<String>;
}

/// Classifier used when external analysis is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledClassifier;

#[async_trait]
impl VideoClassifier for DisabledClassifier {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn classify(&self, _request: &ClassifierRequest) -> Option<String> {
        None
    }
}

/// Replays a fixed response, e.g. one recorded from a real classifier.
#[derive(Debug, Default)]
pub struct StaticClassifier {
    response: Option<String>,
    calls: AtomicUsize,
}

impl StaticClassifier {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A classifier that is reachable but never answers usefully.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Number of `classify` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl VideoClassifier for StaticClassifier {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn classify(&self, _request: &ClassifierRequest) -> Option<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.response.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_classifier_returns_none() {
        let request = ClassifierRequest::new(&[]);
        assert_eq!(DisabledClassifier.classify(&request).await, None);
    }

    #[tokio::test]
    async fn test_static_classifier_counts_calls() {
        let classifier = StaticClassifier::new("{}");
        let request = ClassifierRequest::new(&[]);
        assert_eq!(classifier.classify(&request).await.as_deref(), Some("{}"));
        assert_eq!(classifier.classify(&request).await.as_deref(), Some("{}"));
        assert_eq!(classifier.calls(), 2);

        let unavailable = StaticClassifier::unavailable();
        assert_eq!(unavailable.classify(&request).await, None);
    }
}
