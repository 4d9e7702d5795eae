//! Domain-level error taxonomy for Courtside.

/// Reasons a classifier response is unusable as a whole.
///
/// These never reach pipeline callers; the orchestrator logs them and
/// continues without an AI signal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanitizeError {
    #[error("no JSON object found in classifier response")]
    NoJsonObject,

    #[error("classifier response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("classifier response envelope is not a JSON object")]
    NotAnObject,

    #[error("field `isHandball` is missing or not a boolean")]
    IsHandballNotBool,

    #[error("field `tags` is missing or not an array")]
    TagsNotArray,
}

/// Courtside domain errors.
#[derive(Debug, thiserror::Error)]
pub enum CourtsideError {
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("duplicate exercise id in corpus: {0}")]
    DuplicateExercise(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("classifier error: {0}")]
    Classifier(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Courtside domain operations.
pub type Result<T> = std::result::Result<T, CourtsideError>;
