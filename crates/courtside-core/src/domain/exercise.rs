//! Training exercise corpus entries and their display projection.

use serde::{Deserialize, Serialize};

use super::skill::SkillLevel;

/// A training exercise from the corpus. Read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Unique within a corpus.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-text label such as "Passing" or "Feints & 1v1".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_area: Option<String>,
    /// Ordered; the first tag is the exercise's primary tag.
    #[serde(default)]
    pub tags: Vec<String>,
    pub level: SkillLevel,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Suitable regardless of the requested level.
    #[serde(default)]
    pub all_levels: bool,
}

impl Exercise {
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }
}

/// Display-ready projection of a selected exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseRef {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl ExerciseRef {
    pub fn from_exercise(exercise: &Exercise, rationale: Option<String>) -> Self {
        Self {
            title: exercise.title.clone(),
            url: exercise.url.clone(),
            thumbnail: exercise.thumbnail.clone(),
            description: exercise.description.clone(),
            duration_minutes: exercise.duration_minutes,
            rationale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_deserializes_camel_case_with_defaults() {
        let json = r#"{
            "id": "p-1",
            "title": "Wall passing",
            "focusArea": "Passing",
            "tags": ["passing", "drill"],
            "level": "beginner",
            "url": "https://example.com/p-1",
            "durationMinutes": 10
        }"#;
        let ex: Exercise = serde_json::from_str(json).expect("deserialize");
        assert_eq!(ex.focus_area.as_deref(), Some("Passing"));
        assert_eq!(ex.duration_minutes, Some(10));
        assert!(!ex.all_levels);
        assert_eq!(ex.primary_tag(), Some("passing"));
    }

    #[test]
    fn test_primary_tag_absent_when_untagged() {
        let json = r#"{"id":"x","title":"X","level":"advanced","url":"u"}"#;
        let ex: Exercise = serde_json::from_str(json).expect("deserialize");
        assert_eq!(ex.primary_tag(), None);
    }

    #[test]
    fn test_exercise_ref_projection() {
        let json = r#"{"id":"x","title":"X","level":"advanced","url":"u","thumbnail":"t.jpg"}"#;
        let ex: Exercise = serde_json::from_str(json).expect("deserialize");
        let r = ExerciseRef::from_exercise(&ex, Some("why".to_string()));
        assert_eq!(r.title, "X");
        assert_eq!(r.thumbnail.as_deref(), Some("t.jpg"));
        assert_eq!(r.rationale.as_deref(), Some("why"));
    }
}
