//! Exercise corpus loading.
//!
//! The corpus is loaded once, validated, and then shared read-only (wrap it
//! in an `Arc`) by every analysis in the process.

use std::collections::HashSet;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::info;

use crate::domain::{CourtsideError, Exercise, Result};

const BUILTIN_CORPUS: &str = include_str!("../data/exercises.json");

/// Immutable, validated list of exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseCorpus {
    exercises: Vec<Exercise>,
    digest: String,
}

impl ExerciseCorpus {
    /// Build a corpus, rejecting duplicate ids.
    pub fn new(exercises: Vec<Exercise>) -> Result<Self> {
        let mut seen = HashSet::new();
        for exercise in &exercises {
            if !seen.insert(exercise.id.as_str()) {
                return Err(CourtsideError::DuplicateExercise(exercise.id.clone()));
            }
        }

        let canonical = serde_json::to_vec(&exercises)?;
        let digest = hex::encode(Sha256::digest(&canonical));
        Ok(Self { exercises, digest })
    }

    /// Parse a JSON array of exercises.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let exercises: Vec<Exercise> = serde_json::from_str(json)?;
        Self::new(exercises)
    }

    /// Load a JSON array of exercises from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let corpus = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            exercises = corpus.len(),
            digest = %corpus.short_digest(),
            "exercise corpus loaded"
        );
        Ok(corpus)
    }

    /// The sample corpus bundled with the library.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CORPUS)
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// SHA-256 hex digest of the corpus contents.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// First 12 hex chars of the digest.
    pub fn short_digest(&self) -> &str {
        &self.digest[..12.min(self.digest.len())]
    }
}
