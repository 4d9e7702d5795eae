use courtside_core::feedback::phrases_for;
use courtside_core::{compose_feedback, FeedbackOverrides};

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

#[test]
fn single_tag_uses_canned_pair() {
    let feedback = compose_feedback(&tags(&["shooting"]), None);
    assert_eq!(feedback.title, "Shooting");
    assert_eq!(
        feedback.good[0].text,
        "Arm speed is promising and you finish with a clear follow-through. \
         Your plant step is consistent which supports repeatable mechanics."
    );

    let md = feedback.to_markdown();
    assert!(md.starts_with("## Shooting\n\n### Technical Feedback\n"));
    assert!(md.contains("- **What's good**:\n  - Arm speed is promising"));
    assert!(md.contains("- **What to improve**:\n  - Align the elbow"));
}

#[test]
fn secondary_tag_adds_labelled_lines() {
    let feedback = compose_feedback(&tags(&["passing", "passing", "feint"]), None);
    assert_eq!(feedback.title, "Passing · Feint");
    assert_eq!(feedback.good.len(), 2);
    assert_eq!(feedback.improve[1].tag, "feint");

    let md = feedback.to_markdown();
    assert!(md.contains("  - Passing: Hands are ready"));
    assert!(md.contains("  - Feint: You sell the initial move"));
}

#[test]
fn two_overrides_replace_primary_text() {
    let overrides = FeedbackOverrides {
        positives: vec!["Strong base.".to_string(), "Quick hands".to_string(), "Ignored.".to_string()],
        improvements: vec![],
    };
    let feedback = compose_feedback(&tags(&["footwork", "defense"]), Some(&overrides));
    assert_eq!(feedback.good[0].text, "Strong base. Quick hands.");
    assert!(feedback.improve[0].text.starts_with("Lower the hips"));
    assert!(feedback.good[1].text.starts_with("Solid stance"));
}

#[test]
fn single_override_is_padded_with_canned_second_sentence() {
    let overrides = FeedbackOverrides {
        positives: vec!["Great release".to_string()],
        improvements: vec!["Step into it!".to_string()],
    };
    let feedback = compose_feedback(&tags(&["passing"]), Some(&overrides));
    let canned = phrases_for("passing").expect("passing phrases");
    assert_eq!(
        feedback.good[0].text,
        format!("Great release. {}", canned.good[1])
    );
    assert_eq!(
        feedback.improve[0].text,
        format!("Step into it! {}", canned.improve[1])
    );
}

#[test]
fn override_for_unknown_tag_pads_from_fundamentals() {
    let overrides = FeedbackOverrides {
        positives: vec!["Nice touch.".to_string()],
        improvements: vec![],
    };
    let feedback = compose_feedback(&tags(&["ball-handling"]), Some(&overrides));
    let fundamentals = phrases_for("fundamentals").expect("fundamentals phrases");
    assert_eq!(
        feedback.good[0].text,
        format!("Nice touch. {}", fundamentals.good[1])
    );
}

#[test]
fn markdown_carries_no_markup_from_overrides() {
    let overrides = FeedbackOverrides {
        positives: vec!["<script>alert(1)</script>\nnice".to_string()],
        improvements: vec![],
    };
    let md = compose_feedback(&tags(&["passing"]), Some(&overrides)).to_markdown();
    assert!(!md.contains('<'));
    assert!(!md.contains('>'));
    assert_eq!(md.lines().filter(|l| l.starts_with("  - ")).count(), 2);
}

#[test]
fn tags_cannot_add_headings_or_sections() {
    let md = compose_feedback(
        &tags(&["passing\n\n# Owned\n- **What's good**:", "<i>feint</i>"]),
        None,
    )
    .to_markdown();
    assert!(md.starts_with("## Passing Owned - What's good: · Ifeint/i\n"));
    assert_eq!(md.lines().filter(|l| l.starts_with('#')).count(), 2);
    assert_eq!(md.matches("**What's good**").count(), 1);
    assert!(!md.contains('<'));
}
