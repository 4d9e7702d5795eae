//! Exercise scoring and selection.
//!
//! Every exercise in the corpus is scored against the resolved tags, focus
//! area and level:
//!
//! ```text
//! score = 10 * tag_overlap + 5 * focus_bonus + closeness
//! ```
//!
//! Ranking is score, then tag overlap, then closeness (all descending), then
//! title ascending, so identical inputs always give identical output. The
//! ranked list goes through a selection cascade (tag/focus matches, a
//! fundamentals top-up, a level-only fallback) and finally a diversity pass
//! that limits repeats of a primary tag.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::debug;

use crate::domain::{Exercise, SkillLevel};

/// Hard cap on the number of exercises returned.
pub const MAX_SELECTION: usize = 3;

/// Number of results the cascade tries to guarantee before topping up.
pub const MIN_SELECTION: usize = 2;

/// Vocabulary used when no tags were resolved, and for the top-up step.
pub const FUNDAMENTALS: [&str; 4] = ["passing", "footwork", "ball-handling", "drill"];

/// Inputs to one selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    /// Ordered by priority; the first tag is primary.
    pub tags: Vec<String>,
    pub level: Option<SkillLevel>,
    pub focus_area: Option<String>,
    /// Desired count, clamped to [`MAX_SELECTION`].
    pub count: usize,
}

impl SelectionRequest {
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            tags,
            level: None,
            focus_area: None,
            count: MAX_SELECTION,
        }
    }

    pub fn with_level(mut self, level: Option<SkillLevel>) -> Self {
        self.level = level;
        self
    }

    pub fn with_focus_area(mut self, focus_area: Option<String>) -> Self {
        self.focus_area = focus_area;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    fn target(&self) -> usize {
        self.count.min(MAX_SELECTION)
    }
}

/// An exercise with its score breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredExercise<'a> {
    pub exercise: &'a Exercise,
    /// Exercise tags found in the effective tag list, in exercise order.
    pub matched_tags: Vec<String>,
    pub focus_bonus: u32,
    /// Level closeness plus the all-levels bonus.
    pub closeness: u32,
    pub score: u32,
}

impl<'a> ScoredExercise<'a> {
    pub fn tag_overlap(&self) -> u32 {
        self.matched_tags.len() as u32
    }

    /// Short human-readable reason for the pick, if there is one to give.
    pub fn rationale(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.matched_tags.is_empty() {
            parts.push(format!("Works on {}", self.matched_tags.join(", ")));
        }
        if self.focus_bonus > 0 {
            if let Some(focus) = &self.exercise.focus_area {
                parts.push(format!("focus: {focus}"));
            }
        }
        if self.exercise.all_levels {
            parts.push("suits all levels".to_string());
        } else if self.closeness > 0 {
            parts.push(format!("{} level", self.exercise.level));
        }
        (!parts.is_empty()).then(|| parts.join("; "))
    }
}

/// Closeness of an exercise level to the desired one: 2, 1 or 0.
///
/// Without a desired level every exercise scores 0.
pub fn level_closeness(exercise_level: SkillLevel, desired: Option<SkillLevel>) -> u32 {
    match desired.map(|d| exercise_level.distance(d)) {
        Some(0) => 2,
        Some(1) => 1,
        _ => 0,
    }
}

/// Score one exercise against a lowercased tag list and focus area.
pub fn score_exercise<'a>(
    exercise: &'a Exercise,
    effective_tags: &[String],
    focus: Option<&str>,
    level: Option<SkillLevel>,
) -> ScoredExercise<'a> {
    let matched_tags: Vec<String> = exercise
        .tags
        .iter()
        .map(|tag| tag.to_lowercase())
        .filter(|tag| effective_tags.contains(tag))
        .collect();
    let focus_bonus = match (focus, &exercise.focus_area) {
        (Some(focus), Some(area)) if area.to_lowercase().contains(focus) => 2,
        _ => 0,
    };
    let closeness = level_closeness(exercise.level, level) + u32::from(exercise.all_levels);
    let score = matched_tags.len() as u32 * 10 + focus_bonus * 5 + closeness;

    ScoredExercise {
        exercise,
        matched_tags,
        focus_bonus,
        closeness,
        score,
    }
}

fn by_rank(a: &ScoredExercise<'_>, b: &ScoredExercise<'_>) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.tag_overlap().cmp(&a.tag_overlap()))
        .then_with(|| b.closeness.cmp(&a.closeness))
        .then_with(|| a.exercise.title.cmp(&b.exercise.title))
}

/// Score and rank the whole corpus.
pub fn rank_exercises<'a>(corpus: &'a [Exercise], request: &SelectionRequest) -> Vec<ScoredExercise<'a>> {
    let effective_tags: Vec<String> = if request.tags.is_empty() {
        FUNDAMENTALS.iter().map(|t| t.to_string()).collect()
    } else {
        request.tags.iter().map(|t| t.to_lowercase()).collect()
    };
    let focus = request.focus_area.as_ref().map(|f| f.to_lowercase());

    let mut scored: Vec<ScoredExercise<'a>> = corpus
        .iter()
        .map(|exercise| score_exercise(exercise, &effective_tags, focus.as_deref(), request.level))
        .collect();
    scored.sort_by(by_rank);
    scored
}

/// Rank the corpus on fundamentals and level only, ignoring focus and the
/// all-levels bonus.
fn rank_fundamentals<'a>(corpus: &'a [Exercise], level: Option<SkillLevel>) -> Vec<ScoredExercise<'a>> {
    let fundamentals: Vec<String> = FUNDAMENTALS.iter().map(|t| t.to_string()).collect();
    let mut scored: Vec<ScoredExercise<'a>> = corpus
        .iter()
        .map(|exercise| {
            let mut s = score_exercise(exercise, &fundamentals, None, level);
            s.closeness = level_closeness(exercise.level, level);
            s.score = s.tag_overlap() * 10 + s.closeness;
            s
        })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.exercise.title.cmp(&b.exercise.title))
    });
    scored
}

/// Select a small, diverse set of exercises for the request.
///
/// Never fails; returns fewer than requested when the corpus runs out.
pub fn select_exercises<'a>(corpus: &'a [Exercise], request: &SelectionRequest) -> Vec<ScoredExercise<'a>> {
    let target = request.target();
    let ranked = rank_exercises(corpus, request);
    debug!(
        tags = ?request.tags,
        level = ?request.level,
        focus = ?request.focus_area,
        target,
        top = ?ranked.iter().take(5).map(|s| (s.exercise.id.as_str(), s.score)).collect::<Vec<_>>(),
        "exercises scored"
    );

    let mut picked: Vec<ScoredExercise<'a>> = ranked
        .iter()
        .filter(|s| s.tag_overlap() > 0 || s.focus_bonus > 0)
        .take(target)
        .cloned()
        .collect();
    debug!(picked = ?ids(&picked), "initial pick");

    if picked.len() < MIN_SELECTION.min(target) && !request.tags.is_empty() {
        let seen: HashSet<&str> = picked.iter().map(|s| s.exercise.id.as_str()).collect();
        let top_up: Vec<ScoredExercise<'a>> = rank_fundamentals(corpus, request.level)
            .into_iter()
            .filter(|s| !seen.contains(s.exercise.id.as_str()))
            .take(target - picked.len())
            .collect();
        picked.extend(top_up);
        debug!(picked = ?ids(&picked), "topped up with fundamentals");
    }

    if picked.is_empty() {
        let mut by_level = ranked;
        by_level.sort_by(|a, b| {
            b.closeness
                .cmp(&a.closeness)
                .then_with(|| a.exercise.title.cmp(&b.exercise.title))
        });
        picked = by_level.into_iter().take(target).collect();
        debug!(picked = ?ids(&picked), "no matches, picked by level closeness");
    }

    let diverse = diversify(picked, target);
    debug!(picked = ?ids(&diverse), "diverse final selection");
    diverse
}

/// Keep at most one exercise per primary tag once two have been kept.
///
/// Untagged exercises are always kept. Stops at `target`.
pub fn diversify<'a>(picked: Vec<ScoredExercise<'a>>, target: usize) -> Vec<ScoredExercise<'a>> {
    let mut seen_primary: HashSet<String> = HashSet::new();
    let mut diverse = Vec::new();

    for scored in picked {
        if diverse.len() >= target {
            break;
        }
        let primary = scored.exercise.primary_tag();
        let keep = match primary {
            None => true,
            Some(tag) => !seen_primary.contains(tag) || diverse.len() < MIN_SELECTION,
        };
        if keep {
            if let Some(tag) = primary {
                seen_primary.insert(tag.to_string());
            }
            diverse.push(scored);
        }
    }
    diverse
}

fn ids<'a>(scored: &'a [ScoredExercise<'_>]) -> Vec<&'a str> {
    scored.iter().map(|s| s.exercise.id.as_str()).collect()
}
