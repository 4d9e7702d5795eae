//! Courtside Core Library
//!
//! Handball clip analysis: classifier sanitization, tag and level
//! resolution, exercise selection and feedback composition.

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod domain;
pub mod feedback;
pub mod metrics;
pub mod obs;
pub mod pipeline;
pub mod sanitize;
pub mod selection;
pub mod tags;
pub mod telemetry;
pub mod video;

pub use domain::{
    ActionLabel, ActionSignal, AnalysisResult, CourtsideError, Exercise, ExerciseRef, Result,
    SanitizeError, SanitizedClassification, SkillLevel, REJECTION_MESSAGE,
};

pub use classifier::{
    ClassifierRequest, DisabledClassifier, Frame, GeminiClassifier, StaticClassifier,
    VideoClassifier,
};
pub use config::{AnalyzeOptions, AnalyzerConfig, ClassifierConfig};
pub use corpus::ExerciseCorpus;
pub use feedback::{compose_feedback, Feedback, FeedbackOverrides};
pub use pipeline::{should_reject, Analyzer, REJECTION_CONFIDENCE};
pub use sanitize::{extract_json_object, sanitize_response, SanitizeOptions};
pub use selection::{select_exercises, ScoredExercise, SelectionRequest};
pub use tags::{
    focus_area_for, infer_level_from_file_name, infer_tags_from_file_name, resolve_level,
    resolve_tags,
};
pub use video::VideoInput;

pub use metrics::METRICS;
pub use obs::{
    analysis_span, emit_analysis_accepted, emit_analysis_rejected, emit_analysis_started,
    emit_classifier_result,
};
pub use telemetry::init_tracing;

/// Courtside version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
