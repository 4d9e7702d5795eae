//! Closed vocabularies: skill levels and observable action labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CourtsideError;

/// Ordered proficiency tier.
///
/// Variant order is the total order `beginner < intermediate < advanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 3] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }

    /// Exact, case-sensitive match against the wire spelling.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.as_str() == s)
    }

    fn ordinal(self) -> u8 {
        self as u8
    }

    /// Ordinal distance between two tiers (0, 1 or 2).
    pub fn distance(self, other: SkillLevel) -> u8 {
        self.ordinal().abs_diff(other.ordinal())
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = CourtsideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(&s.trim().to_ascii_lowercase()).ok_or_else(|| {
            CourtsideError::InvalidConfig(format!(
                "unknown skill level '{s}' (expected beginner, intermediate or advanced)"
            ))
        })
    }
}

/// Technique category the classifier may report for a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionLabel {
    Passing,
    Feint,
    Footwork,
    Shooting,
    Defense,
    Goalkeeper,
    Drill,
    Throwing,
}

impl ActionLabel {
    pub const ALL: [ActionLabel; 8] = [
        ActionLabel::Passing,
        ActionLabel::Feint,
        ActionLabel::Footwork,
        ActionLabel::Shooting,
        ActionLabel::Defense,
        ActionLabel::Goalkeeper,
        ActionLabel::Drill,
        ActionLabel::Throwing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ActionLabel::Passing => "passing",
            ActionLabel::Feint => "feint",
            ActionLabel::Footwork => "footwork",
            ActionLabel::Shooting => "shooting",
            ActionLabel::Defense => "defense",
            ActionLabel::Goalkeeper => "goalkeeper",
            ActionLabel::Drill => "drill",
            ActionLabel::Throwing => "throwing",
        }
    }

    /// Exact, case-sensitive match against the wire spelling.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.as_str() == s)
    }

    /// Skill tag this action contributes, if any.
    ///
    /// Goalkeeping is coached as defense; generic drills carry no skill.
    pub fn skill_tag(self) -> Option<&'static str> {
        match self {
            ActionLabel::Passing
            | ActionLabel::Feint
            | ActionLabel::Footwork
            | ActionLabel::Shooting
            | ActionLabel::Defense
            | ActionLabel::Throwing => Some(self.as_str()),
            ActionLabel::Goalkeeper => Some(ActionLabel::Defense.as_str()),
            ActionLabel::Drill => None,
        }
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
