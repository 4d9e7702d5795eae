//! The analyze pipeline.
//!
//! One analysis moves through `started -> rejected` or `started -> accepted`:
//!
//! 1. ask the classifier (when enabled) and sanitize its answer
//! 2. reject the clip if the classifier is confident it is not handball
//! 3. resolve tags, level and focus area
//! 4. select exercises and compose feedback
//! 5. wait out the pacing delay and return
//!
//! Every step degrades to a fallback; the only error a caller can see is a
//! clip that cannot be opened at all.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::Instrument;
use uuid::Uuid;

use crate::classifier::{ClassifierRequest, Frame, VideoClassifier};
use crate::config::{AnalyzeOptions, AnalyzerConfig};
use crate::corpus::ExerciseCorpus;
use crate::domain::{AnalysisResult, ExerciseRef, Result, SanitizedClassification};
use crate::feedback::{compose_feedback, FeedbackOverrides};
use crate::metrics::METRICS;
use crate::obs::{
    analysis_span, emit_analysis_accepted, emit_analysis_rejected, emit_analysis_started,
    emit_classifier_result,
};
use crate::sanitize::sanitize_response;
use crate::selection::{select_exercises, SelectionRequest};
use crate::tags::{focus_area_for, resolve_level, resolve_tags};
use crate::video::VideoInput;

/// Minimum confidence at which a "not handball" verdict rejects the clip.
pub const REJECTION_CONFIDENCE: f64 = 0.8;

/// Whether a sanitized classification rejects the clip as not handball.
///
/// A missing confidence counts as 0.7, so an unqualified "not handball"
/// does not reject on its own.
pub fn should_reject(classification: &SanitizedClassification) -> bool {
    !classification.is_handball && classification.effective_confidence() >= REJECTION_CONFIDENCE
}

/// Pacing delay drawn uniformly from `[min_delay_ms, max_delay_ms]`.
pub fn pacing_delay(options: &AnalyzeOptions) -> Duration {
    let millis = if options.max_delay_ms <= options.min_delay_ms {
        options.min_delay_ms
    } else {
        rand::thread_rng().gen_range(options.min_delay_ms..=options.max_delay_ms)
    };
    Duration::from_millis(millis)
}

/// Orchestrates one classifier call, tag resolution, selection and feedback.
///
/// Cheap to clone; the classifier and corpus are shared.
#[derive(Clone)]
pub struct Analyzer {
    classifier: Arc<dyn VideoClassifier>,
    corpus: Arc<ExerciseCorpus>,
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(
        classifier: Arc<dyn VideoClassifier>,
        corpus: Arc<ExerciseCorpus>,
        config: AnalyzerConfig,
    ) -> Self {
        Self {
            classifier,
            corpus,
            config,
        }
    }

    /// Open a clip from disk and analyze it.
    ///
    /// Fails only when the clip cannot be opened.
    pub async fn analyze_path(
        &self,
        path: &Path,
        frames: Vec<Frame>,
        options: &AnalyzeOptions,
    ) -> Result<AnalysisResult> {
        let video = VideoInput::open(path)?.with_frames(frames);
        Ok(self.analyze(&video, options).await)
    }

    /// Analyze a clip. Never fails.
    pub async fn analyze(&self, video: &VideoInput, options: &AnalyzeOptions) -> AnalysisResult {
        let analysis_id = Uuid::new_v4().to_string();
        self.run(video, options)
            .instrument(analysis_span(&analysis_id, &video.file_name))
            .await
    }

    async fn run(&self, video: &VideoInput, options: &AnalyzeOptions) -> AnalysisResult {
        emit_analysis_started(video.frames.len(), self.config.external_analysis_enabled);

        let classification = self.classify(video).await;
        if let Some(c) = classification.as_ref().filter(|c| should_reject(c)) {
            emit_analysis_rejected(c.effective_confidence());
            METRICS.inc_rejected();
            return AnalysisResult::rejected();
        }

        let tags = resolve_tags(classification.as_ref(), &video.file_name);
        let level = resolve_level(classification.as_ref(), &video.file_name, options.level);
        let focus_area = tags.first().and_then(|t| focus_area_for(t));

        let request = SelectionRequest::new(tags.clone())
            .with_level(level)
            .with_focus_area(focus_area.map(str::to_string))
            .with_count(self.config.exercise_count);
        let exercises: Vec<ExerciseRef> = select_exercises(self.corpus.exercises(), &request)
            .iter()
            .map(|s| ExerciseRef::from_exercise(s.exercise, s.rationale()))
            .collect();

        let overrides = classification.map(|c| FeedbackOverrides {
            positives: c.positives,
            improvements: c.improvements,
        });
        let markdown = compose_feedback(&tags, overrides.as_ref()).to_markdown();

        emit_analysis_accepted(&tags, level, exercises.len());
        METRICS.inc_accepted();

        let delay = pacing_delay(options);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        AnalysisResult::Accepted {
            markdown,
            exercises,
            tags,
        }
    }

    async fn classify(&self, video: &VideoInput) -> Option<SanitizedClassification> {
        if !self.config.external_analysis_enabled {
            emit_classifier_result("disabled", false, false);
            METRICS.inc_classifier_fallbacks();
            return None;
        }

        let request = ClassifierRequest::new(&video.frames);
        let response = self.classifier.classify(&request).await;
        let sanitized = response
            .as_deref()
            .and_then(|text| sanitize_response(text, &self.config.sanitize));

        emit_classifier_result(self.classifier.name(), response.is_some(), sanitized.is_some());
        if sanitized.is_none() {
            METRICS.inc_classifier_fallbacks();
        }
        sanitized
    }
}
