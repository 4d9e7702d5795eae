//! Structured observability hooks for the analysis lifecycle.
//!
//! This module provides:
//! - An analysis-scoped tracing span, attached with `Instrument` so it
//!   survives await points
//! - Emission functions for lifecycle events: start, classifier result,
//!   rejection, acceptance
//!
//! Events are emitted at `info!` level; filter with `RUST_LOG`.

use tracing::info;

use crate::domain::SkillLevel;

/// Span tagging every event of one analysis with its id and file name.
///
/// # Example
///
/// ```ignore
/// use tracing::Instrument;
/// run_analysis().instrument(analysis_span("6f1c...", "u12_passing.mp4")).await;
/// ```
pub fn analysis_span(analysis_id: &str, file_name: &str) -> tracing::Span {
    tracing::info_span!(
        "courtside.analysis",
        analysis_id = %analysis_id,
        file_name = %file_name,
    )
}

/// Emit event: analysis started.
pub fn emit_analysis_started(frames: usize, external_analysis: bool) {
    info!(
        event = "analysis.started",
        frames = frames,
        external_analysis = external_analysis,
    );
}

/// Emit event: outcome of the classifier step.
///
/// `usable` is false when the classifier was skipped, returned nothing, or
/// returned a response the sanitizer rejected.
pub fn emit_classifier_result(classifier: &str, responded: bool, usable: bool) {
    info!(
        event = "classifier.result",
        classifier = %classifier,
        responded = responded,
        usable = usable,
    );
}

/// Emit event: clip rejected as not handball.
pub fn emit_analysis_rejected(confidence: f64) {
    info!(event = "analysis.rejected", confidence = confidence);
}

/// Emit event: analysis accepted with resolved tags and selection size.
pub fn emit_analysis_accepted(tags: &[String], level: Option<SkillLevel>, exercises: usize) {
    info!(
        event = "analysis.accepted",
        tags = ?tags,
        level = ?level,
        exercises = exercises,
    );
}
