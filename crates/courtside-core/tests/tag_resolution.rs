use courtside_core::tags::{tags_from_actions, FILE_NAME_VOCABULARY};
use courtside_core::{
    focus_area_for, infer_level_from_file_name, infer_tags_from_file_name, resolve_level,
    resolve_tags, ActionLabel, ActionSignal, SanitizedClassification, SkillLevel,
};

fn classification(tags: &[&str], actions: &[ActionLabel]) -> SanitizedClassification {
    SanitizedClassification {
        is_handball: true,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        positives: vec![],
        improvements: vec![],
        confidence: None,
        level: None,
        actions: actions
            .iter()
            .map(|&label| ActionSignal {
                label,
                confidence: 0.9,
            })
            .collect(),
    }
}

// ── Tags ────────────────────────────────────────────────────────────────

#[test]
fn actions_take_priority_over_tags() {
    let c = classification(
        &["shooting"],
        &[ActionLabel::Goalkeeper, ActionLabel::Drill, ActionLabel::Passing],
    );
    assert_eq!(resolve_tags(Some(&c), "feint.mp4"), vec!["defense", "passing"]);
}

#[test]
fn action_tags_are_deduplicated_and_capped() {
    let c = classification(
        &[],
        &[
            ActionLabel::Defense,
            ActionLabel::Goalkeeper,
            ActionLabel::Feint,
            ActionLabel::Throwing,
        ],
    );
    assert_eq!(tags_from_actions(&c), vec!["defense", "feint", "throwing"]);
}

#[test]
fn drill_only_actions_fall_through_to_tags() {
    let c = classification(&["footwork"], &[ActionLabel::Drill]);
    assert_eq!(resolve_tags(Some(&c), "x.mp4"), vec!["footwork"]);
}

#[test]
fn empty_classification_falls_through_to_file_name() {
    let c = classification(&[], &[]);
    assert_eq!(
        resolve_tags(Some(&c), "Shooting_and_PASSING.mov"),
        vec!["passing", "shooting"]
    );
    assert_eq!(resolve_tags(None, "u14_defense.mp4"), vec!["defense"]);
}

#[test]
fn file_name_fallback_is_total_and_deterministic() {
    for name in ["", "a", "clip.mp4", "VID_20240101.mp4", "übung.mp4", "🎥.mov"] {
        let first = infer_tags_from_file_name(name);
        let second = infer_tags_from_file_name(name);
        assert_eq!(first.len(), 1, "name {name:?}");
        assert!(FILE_NAME_VOCABULARY.contains(&first[0].as_str()));
        assert_eq!(first, second);
    }
}

#[test]
fn file_name_fallback_indexes_by_length() {
    assert_eq!(infer_tags_from_file_name(""), vec!["passing"]);
    assert_eq!(infer_tags_from_file_name("clip.mp4"), vec!["feint"]);
    assert_eq!(infer_tags_from_file_name("abcdefg"), vec!["passing"]);
    assert_eq!(infer_tags_from_file_name("abcde"), vec!["throwing"]);
}

// ── Level ───────────────────────────────────────────────────────────────

#[test]
fn level_tokens_must_be_delimited() {
    assert_eq!(infer_level_from_file_name("u12_drill.mp4"), Some(SkillLevel::Beginner));
    assert_eq!(infer_level_from_file_name("team-U15.mp4"), Some(SkillLevel::Intermediate));
    assert_eq!(infer_level_from_file_name("adv shooting.mov"), Some(SkillLevel::Advanced));
    assert_eq!(infer_level_from_file_name("international.mp4"), None);
    assert_eq!(infer_level_from_file_name("beginners.mp4"), None);
}

#[test]
fn level_priority_is_classifier_then_name_then_default() {
    let mut c = classification(&[], &[]);
    c.level = Some(SkillLevel::Advanced);
    assert_eq!(
        resolve_level(Some(&c), "u10.mp4", Some(SkillLevel::Intermediate)),
        Some(SkillLevel::Advanced)
    );

    c.level = None;
    assert_eq!(
        resolve_level(Some(&c), "u10.mp4", Some(SkillLevel::Intermediate)),
        Some(SkillLevel::Beginner)
    );
    assert_eq!(
        resolve_level(None, "clip.mp4", Some(SkillLevel::Intermediate)),
        Some(SkillLevel::Intermediate)
    );
    assert_eq!(resolve_level(None, "clip.mp4", None), None);
}

#[test]
fn focus_area_table() {
    assert_eq!(focus_area_for("feint"), Some("Feints"));
    assert_eq!(focus_area_for("passing"), Some("Passing"));
    assert_eq!(focus_area_for("drill"), None);
}
