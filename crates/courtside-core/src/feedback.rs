//! Coaching feedback composition.
//!
//! Feedback covers the primary tag and, when present, one secondary tag.
//! Each tag gets a two-sentence "what's good" and "what to improve" text
//! from a canned phrase table. Classifier sentences, when supplied, replace
//! the primary tag's canned text.
//!
//! Override rule: the first two classifier sentences are used; a single
//! classifier sentence is followed by the canned second sentence of the
//! primary tag (or of `fundamentals` when the tag has no phrases).

use serde::{Deserialize, Serialize};

use crate::sanitize::{clean_tag, ensure_terminal};

/// Tag used when no tags were resolved, and for tags without phrases.
pub const FUNDAMENTALS_TAG: &str = "fundamentals";

/// Canned phrasing for one tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPhrases {
    pub good: [&'static str; 2],
    pub improve: [&'static str; 2],
}

const PHRASES: &[(&str, TagPhrases)] = &[
    (
        "passing",
        TagPhrases {
            good: [
                "Hands are ready and your release is steady; timing looks controlled.",
                "You stay balanced through the pass which keeps trajectory predictable.",
            ],
            improve: [
                "Snap the wrist and step through the pass to drive accuracy and pace.",
                "Add a clear target and finish the pass with fingers pointing to the receiver.",
            ],
        },
    ),
    (
        "throwing",
        TagPhrases {
            good: [
                "Arm path is compact with a clean wrist snap through release.",
                "You sequence hips, torso and arm well which preserves efficiency.",
            ],
            improve: [
                "Lead with the elbow and rotate the trunk to add power without forcing the shoulder.",
                "Plant the front foot firmly and keep the head stable through release.",
            ],
        },
    ),
    (
        "footwork",
        TagPhrases {
            good: [
                "Light feet and a stable base help you stay balanced.",
                "You keep short steps and active hips which support quick changes of direction.",
            ],
            improve: [
                "Lower the hips and clean up plant-foot timing to change direction faster.",
                "Keep the chest tall and avoid crossing the feet under pressure.",
            ],
        },
    ),
    (
        "shooting",
        TagPhrases {
            good: [
                "Arm speed is promising and you finish with a clear follow-through.",
                "Your plant step is consistent which supports repeatable mechanics.",
            ],
            improve: [
                "Align the elbow and sync jump timing for more power and control.",
                "Focus the eyes on a small target and hold the follow-through for a beat.",
            ],
        },
    ),
    (
        "defense",
        TagPhrases {
            good: [
                "Solid stance with active shuffle keeps you in front of the attacker.",
                "You angle the body well to show the attacker away from the middle.",
            ],
            improve: [
                "Manage distance and keep the hands active without fouling.",
                "React with the feet first and block with the chest, not the arms.",
            ],
        },
    ),
    (
        "feint",
        TagPhrases {
            good: [
                "You sell the initial move and commit to the direction change.",
                "Body lean and ball protection are coordinated which keeps the move safe.",
            ],
            improve: [
                "Explode off the first step and use the eyes to disguise the intention.",
                "Set up the feint with a clear tempo change to unbalance the defender.",
            ],
        },
    ),
    (
        FUNDAMENTALS_TAG,
        TagPhrases {
            good: [
                "Consistent effort and clear intent through the action.",
                "Control of balance and ball placement is improving steadily.",
            ],
            improve: [
                "Tidy up alignment and timing for better efficiency and control.",
                "Keep movements compact and repeatable before adding speed.",
            ],
        },
    ),
];

/// Canned phrases for `tag`, if the table has any.
pub fn phrases_for(tag: &str) -> Option<&'static TagPhrases> {
    PHRASES.iter().find(|(t, _)| *t == tag).map(|(_, p)| p)
}

fn phrases_or_fundamentals(tag: &str) -> &'static TagPhrases {
    phrases_for(tag)
        .or_else(|| phrases_for(FUNDAMENTALS_TAG))
        .unwrap_or(&PHRASES[PHRASES.len() - 1].1)
}

/// Classifier sentences that replace the primary tag's canned text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackOverrides {
    pub positives: Vec<String>,
    pub improvements: Vec<String>,
}

/// One bullet: the tag it belongs to and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackLine {
    pub tag: String,
    pub text: String,
}

/// Structured feedback for one analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub title: String,
    pub good: Vec<FeedbackLine>,
    pub improve: Vec<FeedbackLine>,
}

impl Feedback {
    fn has_secondary(&self) -> bool {
        self.good.len() > 1
    }

    /// Render as markdown: a heading, then the two bulleted sections.
    pub fn to_markdown(&self) -> String {
        let prefixed = self.has_secondary();
        let bullets = |lines: &[FeedbackLine]| {
            lines
                .iter()
                .map(|line| {
                    if prefixed {
                        format!("  - {}: {}", labelize(&line.tag), line.text)
                    } else {
                        format!("  - {}", line.text)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        };
        format!(
            "## {}\n\n### Technical Feedback\n- **What's good**:\n{}\n- **What to improve**:\n{}",
            self.title,
            bullets(&self.good),
            bullets(&self.improve),
        )
    }
}

/// Capitalize the first character of a tag for display.
pub fn labelize(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collapse whitespace and drop angle brackets so classifier text cannot
/// break the bullet structure or smuggle markup.
fn clean_sentence(sentence: &str) -> String {
    let flat = sentence
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['<', '>'], "");
    ensure_terminal(&flat)
}

fn join_sentences(first: &str, second: Option<&str>) -> String {
    let first = clean_sentence(first);
    match second.map(clean_sentence) {
        Some(second) => format!("{first} {second}"),
        None => first,
    }
}

fn primary_text(overrides: &[String], canned: [&'static str; 2]) -> String {
    match overrides {
        [] => join_sentences(canned[0], Some(canned[1])),
        [only] => join_sentences(only, Some(canned[1])),
        [first, second, ..] => join_sentences(first, Some(second.as_str())),
    }
}

/// Compose feedback for the resolved tags.
///
/// Tags are reduced to plain text before they reach the title or labels;
/// tags with nothing left are skipped.
pub fn compose_feedback(tags: &[String], overrides: Option<&FeedbackOverrides>) -> Feedback {
    let tags: Vec<String> = tags.iter().filter_map(|t| clean_tag(t)).collect();
    let primary = tags.first().map(String::as_str).unwrap_or(FUNDAMENTALS_TAG);
    let secondary = tags.iter().map(String::as_str).find(|t| *t != primary);

    let base = phrases_or_fundamentals(primary);
    let empty = FeedbackOverrides::default();
    let overrides = overrides.unwrap_or(&empty);

    let mut good = vec![FeedbackLine {
        tag: primary.to_string(),
        text: primary_text(&overrides.positives, base.good),
    }];
    let mut improve = vec![FeedbackLine {
        tag: primary.to_string(),
        text: primary_text(&overrides.improvements, base.improve),
    }];

    let title = match secondary {
        Some(secondary) => {
            let phrases = phrases_or_fundamentals(secondary);
            good.push(FeedbackLine {
                tag: secondary.to_string(),
                text: join_sentences(phrases.good[0], Some(phrases.good[1])),
            });
            improve.push(FeedbackLine {
                tag: secondary.to_string(),
                text: join_sentences(phrases.improve[0], Some(phrases.improve[1])),
            });
            format!("{} · {}", labelize(primary), labelize(secondary))
        }
        None => labelize(primary),
    };

    Feedback {
        title,
        good,
        improve,
    }
}
