//! Domain models for Courtside.
//!
//! Canonical definitions for the core entities:
//! - `SkillLevel` / `ActionLabel`: closed vocabularies shared by every stage
//! - `SanitizedClassification`: validated classifier output
//! - `Exercise`: read-only corpus entry, projected into `ExerciseRef`
//! - `AnalysisResult`: the tagged outcome of one analysis call

pub mod analysis;
pub mod classification;
pub mod error;
pub mod exercise;
pub mod skill;

// Re-export main types and errors
pub use analysis::{AnalysisResult, REJECTION_MESSAGE};
pub use classification::{ActionSignal, SanitizedClassification};
pub use error::{CourtsideError, Result, SanitizeError};
pub use exercise::{Exercise, ExerciseRef};
pub use skill::{ActionLabel, SkillLevel};
