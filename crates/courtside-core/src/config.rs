//! Configuration values for the analyzer and its classifier.
//!
//! Nothing in the pipeline reads the environment; binaries build these
//! values (optionally via the `from_env` constructors) and pass them in.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::SkillLevel;
use crate::sanitize::SanitizeOptions;
use crate::selection::MAX_SELECTION;

/// Default pacing delay range in milliseconds.
pub const DEFAULT_DELAY_MS: (u64, u64) = (2000, 4000);

/// Per-call options supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    /// Level used when neither the classifier nor the file name suggests one.
    pub level: Option<SkillLevel>,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            level: None,
            min_delay_ms: DEFAULT_DELAY_MS.0,
            max_delay_ms: DEFAULT_DELAY_MS.1,
        }
    }
}

impl AnalyzeOptions {
    pub fn with_level(mut self, level: Option<SkillLevel>) -> Self {
        self.level = level;
        self
    }

    pub fn with_delay(mut self, min_delay_ms: u64, max_delay_ms: u64) -> Self {
        self.min_delay_ms = min_delay_ms;
        self.max_delay_ms = max_delay_ms;
        self
    }

    /// No pacing delay at all.
    pub fn immediate(self) -> Self {
        self.with_delay(0, 0)
    }
}

/// Process-wide analyzer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// When false the classifier is never called.
    pub external_analysis_enabled: bool,
    pub sanitize: SanitizeOptions,
    /// Exercises returned per analysis (clamped to 3 by the selector).
    pub exercise_count: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            external_analysis_enabled: false,
            sanitize: SanitizeOptions::default(),
            exercise_count: MAX_SELECTION,
        }
    }
}

impl AnalyzerConfig {
    /// Read settings from the environment.
    ///
    /// - `COURTSIDE_ALLOW_EXTERNAL_ANALYSIS`: `true` enables the classifier
    /// - `COURTSIDE_MAX_SENTENCES`: sentences kept per feedback list
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            external_analysis_enabled: std::env::var("COURTSIDE_ALLOW_EXTERNAL_ANALYSIS")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            sanitize: SanitizeOptions {
                max_sentences: std::env::var("COURTSIDE_MAX_SENTENCES")
                    .ok()
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(defaults.sanitize.max_sentences),
            },
            exercise_count: defaults.exercise_count,
        }
    }

    pub fn with_external_analysis(mut self, enabled: bool) -> Self {
        self.external_analysis_enabled = enabled;
        self
    }
}

/// Connection settings for the HTTP classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub api_key: Option<String>,
    pub model: String,
    /// API base URL, without the `/v1beta/...` path.
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClassifierConfig {
    /// Read settings from the environment.
    ///
    /// - `GEMINI_API_KEY`
    /// - `COURTSIDE_GEMINI_MODEL`
    /// - `COURTSIDE_GEMINI_ENDPOINT`
    /// - `COURTSIDE_CLASSIFIER_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            model: std::env::var("COURTSIDE_GEMINI_MODEL").unwrap_or(defaults.model),
            endpoint: std::env::var("COURTSIDE_GEMINI_ENDPOINT").unwrap_or(defaults.endpoint),
            timeout: std::env::var("COURTSIDE_CLASSIFIER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }
}
