//! Value types shared by the rotation engine

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque identifier for a player or a team.
///
/// Individual formats pass player ids, team formats pass team ids; the
/// rotation logic treats both the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Gender category used by the mixed-constrained formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

/// Cumulative ranking score per participant; missing entries read as 0.
pub type ScoreMap = HashMap<ParticipantId, f64>;

/// Gender per participant; mixed formats require an entry for every
/// participant they consume.
pub type GenderMap = HashMap<ParticipantId, Gender>;

/// A match from a completed round, as recorded by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayedMatch {
    /// Exactly the participant ids that took part.
    pub participants: Vec<ParticipantId>,
}

/// One completed round: the set of matches played simultaneously.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletedRound {
    pub matches: Vec<PlayedMatch>,
}

impl CompletedRound {
    /// Whether the participant played in any match of this round.
    pub fn involves(&self, id: &ParticipantId) -> bool {
        self.matches.iter().any(|m| m.participants.contains(id))
    }
}

/// Bonus-point parameters attached to Super Mexicano matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusMeta {
    pub bonus_points: u32,
    pub bonus_from_round: u32,
}

/// A proposed court assignment: an unordered pair of participant ids.
///
/// Court index and round id are assigned by the caller when it persists the
/// proposal; the engine never decides those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedMatch {
    pub sides: [ParticipantId; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<BonusMeta>,
}

impl ProposedMatch {
    pub fn new(a: ParticipantId, b: ParticipantId) -> Self {
        Self {
            sides: [a, b],
            bonus: None,
        }
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.sides.iter().any(|s| s == id)
    }
}

impl From<&ProposedMatch> for PlayedMatch {
    fn from(m: &ProposedMatch) -> Self {
        Self {
            participants: m.sides.to_vec(),
        }
    }
}

/// Everything one round-generation call reads.
///
/// Assembled fresh by the caller per call; the engine never mutates it and
/// caches nothing between calls. The iteration order of `participants`
/// defines every tie-break in the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundContext {
    pub participants: Vec<ParticipantId>,
    /// Completed rounds, oldest to newest.
    #[serde(default)]
    pub history: Vec<CompletedRound>,
    /// Required by Mixed Americano, Mixicano and Super Mexicano.
    #[serde(default)]
    pub genders: Option<GenderMap>,
    /// Required by the Mexicano family.
    #[serde(default)]
    pub scores: Option<ScoreMap>,
}

/// The engine's numeric knobs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Rounds a participant may rest consecutively before being forced in.
    pub max_rest_streak: u32,
    /// Super Mexicano bonus points per match.
    pub bonus_points: u32,
    /// Round number from which the Super Mexicano bonus applies.
    pub bonus_from_round: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            max_rest_streak: 2,
            bonus_points: 1,
            bonus_from_round: 2,
        }
    }
}
