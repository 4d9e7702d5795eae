//! Outcome of one analysis call.

use serde::{Deserialize, Serialize};

use super::exercise::ExerciseRef;

/// Message returned when the clip is confidently not handball.
pub const REJECTION_MESSAGE: &str = "The uploaded video does not appear to be related to handball. \
Please upload a handball training or match clip.";

/// Tagged result of the analyze pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    /// The clip was judged not to depict handball.
    Rejected { message: String },
    /// Feedback and exercises for the resolved skills.
    Accepted {
        markdown: String,
        exercises: Vec<ExerciseRef>,
        tags: Vec<String>,
    },
}

impl AnalysisResult {
    pub fn rejected() -> Self {
        AnalysisResult::Rejected {
            message: REJECTION_MESSAGE.to_string(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, AnalysisResult::Rejected { .. })
    }
}
