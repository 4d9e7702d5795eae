//! Skill tag and level resolution.
//!
//! Tags come from the first source that yields anything:
//! 1. sanitized classifier actions, mapped to skill tags
//! 2. sanitized classifier tags
//! 3. the clip's file name
//!
//! The file-name step is total, so resolution never returns an empty list.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{SanitizedClassification, SkillLevel};

/// Maximum number of tags derived from classifier actions.
pub const MAX_ACTION_TAGS: usize = 3;

/// Vocabulary searched for in file names, in match order.
pub const FILE_NAME_VOCABULARY: [&str; 7] = [
    "passing", "feint", "footwork", "shooting", "defense", "throwing", "drill",
];

/// Resolve the ordered working tag list for one analysis.
pub fn resolve_tags(classification: Option<&SanitizedClassification>, file_name: &str) -> Vec<String> {
    if let Some(c) = classification {
        let from_actions = tags_from_actions(c);
        if !from_actions.is_empty() {
            return from_actions;
        }
        if !c.tags.is_empty() {
            return c.tags.clone();
        }
    }
    infer_tags_from_file_name(file_name)
}

/// Map actions to skill tags, dedupe in first-seen order, cap at 3.
pub fn tags_from_actions(classification: &SanitizedClassification) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in classification
        .actions
        .iter()
        .filter_map(|action| action.label.skill_tag())
    {
        if tags.len() == MAX_ACTION_TAGS {
            break;
        }
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Tags named in the file name, or one deterministic pick when none are.
///
/// The fallback indexes the vocabulary by name length. It has no semantic
/// grounding and only keeps the result total and reproducible.
pub fn infer_tags_from_file_name(file_name: &str) -> Vec<String> {
    let name = file_name.to_lowercase();
    let hits: Vec<String> = FILE_NAME_VOCABULARY
        .iter()
        .filter(|candidate| name.contains(*candidate))
        .map(|candidate| candidate.to_string())
        .collect();
    if !hits.is_empty() {
        return hits;
    }

    // Length in UTF-16 code units, as reported by browser file handles.
    let idx = file_name.encode_utf16().count() % FILE_NAME_VOCABULARY.len();
    vec![FILE_NAME_VOCABULARY[idx].to_string()]
}

fn level_patterns() -> &'static [(SkillLevel, Regex)] {
    static PATTERNS: OnceLock<Vec<(SkillLevel, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (SkillLevel::Beginner, "beg|beginner|u9|u10|u11|u12"),
            (SkillLevel::Intermediate, "int|intermediate|u13|u14|u15"),
            (SkillLevel::Advanced, "adv|advanced|u16|u17|u18|u19"),
        ]
        .into_iter()
        .filter_map(|(level, tokens)| {
            Regex::new(&format!("(^|[^a-z])({tokens})([^a-z]|$)"))
                .ok()
                .map(|re| (level, re))
        })
        .collect()
    })
}

/// Skill level hinted at by age-group or level tokens in the file name.
///
/// Tokens must not be embedded in a longer word: `u12_drill.mp4` is a
/// beginner hint, `international.mp4` is not.
pub fn infer_level_from_file_name(file_name: &str) -> Option<SkillLevel> {
    let name = file_name.to_lowercase();
    level_patterns()
        .iter()
        .find(|(_, re)| re.is_match(&name))
        .map(|(level, _)| *level)
}

/// Classifier level, then file-name hint, then the caller's default.
pub fn resolve_level(
    classification: Option<&SanitizedClassification>,
    file_name: &str,
    default: Option<SkillLevel>,
) -> Option<SkillLevel> {
    classification
        .and_then(|c| c.level)
        .or_else(|| infer_level_from_file_name(file_name))
        .or(default)
}

/// Display name of the focus area implied by the primary tag.
pub fn focus_area_for(tag: &str) -> Option<&'static str> {
    match tag {
        "passing" => Some("Passing"),
        "throwing" => Some("Throwing"),
        "footwork" => Some("Footwork"),
        "shooting" => Some("Shooting"),
        "defense" => Some("Defense"),
        "feint" => Some("Feints"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_hits_in_vocabulary_order() {
        assert_eq!(
            infer_tags_from_file_name("Drill_Shooting_and_PASSING.mov"),
            vec!["passing", "shooting", "drill"]
        );
    }

    #[test]
    fn test_file_name_fallback_uses_length() {
        // "clip.mp4" has 8 units; 8 % 7 == 1 -> "feint"
        assert_eq!(infer_tags_from_file_name("clip.mp4"), vec!["feint"]);
        assert_eq!(infer_tags_from_file_name(""), vec!["passing"]);
    }

    #[test]
    fn test_level_tokens_are_boundary_anchored() {
        assert_eq!(
            infer_level_from_file_name("u12_training.mp4"),
            Some(SkillLevel::Beginner)
        );
        assert_eq!(
            infer_level_from_file_name("team-int-session.mp4"),
            Some(SkillLevel::Intermediate)
        );
        assert_eq!(
            infer_level_from_file_name("ADV.mov"),
            Some(SkillLevel::Advanced)
        );
        assert_eq!(infer_level_from_file_name("international.mp4"), None);
        assert_eq!(infer_level_from_file_name("beginnings.mp4"), None);
    }

    #[test]
    fn test_focus_area_table() {
        assert_eq!(focus_area_for("feint"), Some("Feints"));
        assert_eq!(focus_area_for("drill"), None);
    }
}
