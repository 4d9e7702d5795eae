//! Validated classifier output.

use serde::{Deserialize, Serialize};

use super::skill::{ActionLabel, SkillLevel};

/// One observed action with the classifier's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionSignal {
    pub label: ActionLabel,
    /// Always within 0.0–1.0.
    pub confidence: f64,
}

/// Classifier result after sanitization.
///
/// # Invariants
///
/// - `tags` holds at most 3 non-empty strings, in response order.
/// - `actions` holds at most 3 entries, each with a known label.
/// - `positives` and `improvements` hold at most the configured number of
///   single sentences, each ending in `.`, `!` or `?`.
/// - `level` and `confidence` are present only when the response carried a
///   valid value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizedClassification {
    pub is_handball: bool,
    pub tags: Vec<String>,
    pub positives: Vec<String>,
    pub improvements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<SkillLevel>,
    pub actions: Vec<ActionSignal>,
}

impl SanitizedClassification {
    /// Confidence used when the response omitted one.
    pub const DEFAULT_CONFIDENCE: f64 = 0.7;

    pub fn effective_confidence(&self) -> f64 {
        self.confidence.unwrap_or(Self::DEFAULT_CONFIDENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_confidence_defaults() {
        let c = SanitizedClassification {
            is_handball: true,
            tags: vec![],
            positives: vec![],
            improvements: vec![],
            confidence: None,
            level: None,
            actions: vec![],
        };
        assert_eq!(c.effective_confidence(), 0.7);

        let c = SanitizedClassification {
            confidence: Some(0.95),
            ..c
        };
        assert_eq!(c.effective_confidence(), 0.95);
    }
}
