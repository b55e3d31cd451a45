//! Format dispatch: one proposed round per call

use crate::error::RotationError;
use crate::matching::{
    pair_by_score, pair_mixed, pair_mixed_by_score, pair_mixed_by_score_with_bonus, pair_random,
};
use crate::selection::select_active_pool;
use crate::types::{BonusMeta, GenderMap, ProposedMatch, RotationConfig, RoundContext, ScoreMap};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The seven rotation/scoring rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Americano,
    MixedAmericano,
    TeamAmericano,
    Mexicano,
    Mixicano,
    TeamMexicano,
    SuperMexicano,
}

impl Format {
    pub const ALL: [Format; 7] = [
        Format::Americano,
        Format::MixedAmericano,
        Format::TeamAmericano,
        Format::Mexicano,
        Format::Mixicano,
        Format::TeamMexicano,
        Format::SuperMexicano,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Format::Americano => "americano",
            Format::MixedAmericano => "mixed_americano",
            Format::TeamAmericano => "team_americano",
            Format::Mexicano => "mexicano",
            Format::Mixicano => "mixicano",
            Format::TeamMexicano => "team_mexicano",
            Format::SuperMexicano => "super_mexicano",
        }
    }

    /// Whether participant ids name teams rather than players.
    pub fn is_team_format(&self) -> bool {
        matches!(self, Format::TeamAmericano | Format::TeamMexicano)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "americano" => Ok(Format::Americano),
            "mixed_americano" => Ok(Format::MixedAmericano),
            "team_americano" => Ok(Format::TeamAmericano),
            "mexicano" => Ok(Format::Mexicano),
            "mixicano" => Ok(Format::Mixicano),
            "team_mexicano" => Ok(Format::TeamMexicano),
            "super_mexicano" => Ok(Format::SuperMexicano),
            _ => Err(RotationError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Propose the next round for `format`, drawing any shuffle randomness from
/// the supplied source.
///
/// Selects the active pool under the configured rest constraint, then applies
/// the format's pairing strategy. Fewer than two active participants (or zero
/// courts) is a legitimate "no round possible" outcome and yields an empty
/// list. The result is a pure function of the inputs plus the random source;
/// nothing is cached or mutated between calls.
pub fn generate_round_with_rng<R: Rng>(
    format: Format,
    ctx: &RoundContext,
    courts: usize,
    config: &RotationConfig,
    rng: &mut R,
) -> Result<Vec<ProposedMatch>, RotationError> {
    let selection = select_active_pool(&ctx.participants, &ctx.history, courts, config.max_rest_streak);
    let pool = &selection.active;
    if pool.len() < 2 {
        return Ok(Vec::new());
    }

    match format {
        Format::Americano | Format::TeamAmericano => Ok(pair_random(pool, rng)),
        Format::Mexicano | Format::TeamMexicano => {
            let scores = require_scores(format, ctx)?;
            Ok(pair_by_score(pool, scores))
        }
        Format::MixedAmericano => {
            let genders = require_genders(format, ctx)?;
            pair_mixed(pool, genders, courts)
        }
        Format::Mixicano => {
            let genders = require_genders(format, ctx)?;
            let scores = require_scores(format, ctx)?;
            pair_mixed_by_score(pool, genders, scores, courts)
        }
        Format::SuperMexicano => {
            let genders = require_genders(format, ctx)?;
            let scores = require_scores(format, ctx)?;
            let bonus = BonusMeta {
                bonus_points: config.bonus_points,
                bonus_from_round: config.bonus_from_round,
            };
            pair_mixed_by_score_with_bonus(pool, genders, scores, courts, bonus)
        }
    }
}

/// [`generate_round_with_rng`] with the process random source, for callers
/// that do not need reproducible shuffles.
pub fn generate_round(
    format: Format,
    ctx: &RoundContext,
    courts: usize,
    config: &RotationConfig,
) -> Result<Vec<ProposedMatch>, RotationError> {
    generate_round_with_rng(format, ctx, courts, config, &mut rand::thread_rng())
}

fn require_scores(format: Format, ctx: &RoundContext) -> Result<&ScoreMap, RotationError> {
    ctx.scores.as_ref().ok_or(RotationError::MissingContext {
        format,
        field: "score",
    })
}

fn require_genders(format: Format, ctx: &RoundContext) -> Result<&GenderMap, RotationError> {
    ctx.genders.as_ref().ok_or(RotationError::MissingContext {
        format,
        field: "gender",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gender, ParticipantId};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ids(names: &[&str]) -> Vec<ParticipantId> {
        names.iter().map(|n| (*n).into()).collect()
    }

    #[test]
    fn test_every_format_name_round_trips() {
        for format in Format::ALL {
            assert_eq!(format.name().parse::<Format>().unwrap(), format);
        }
    }

    #[test]
    fn test_unknown_format_name_is_rejected() {
        let err = "britano".parse::<Format>().unwrap_err();
        assert_eq!(err, RotationError::UnsupportedFormat("britano".to_string()));
    }

    #[test]
    fn test_score_format_without_score_map_fails() {
        let ctx = RoundContext {
            participants: ids(&["a", "b"]),
            ..Default::default()
        };

        let err = generate_round(Format::Mexicano, &ctx, 1, &RotationConfig::default())
            .unwrap_err();

        assert!(matches!(err, RotationError::MissingContext { .. }));
    }

    #[test]
    fn test_mixed_format_without_gender_map_fails() {
        let ctx = RoundContext {
            participants: ids(&["a", "b"]),
            ..Default::default()
        };

        let err = generate_round(Format::MixedAmericano, &ctx, 1, &RotationConfig::default())
            .unwrap_err();

        assert!(matches!(err, RotationError::MissingContext { .. }));
    }

    #[test]
    fn test_too_few_participants_yields_empty_round() {
        let ctx = RoundContext {
            participants: ids(&["solo"]),
            ..Default::default()
        };

        let matches =
            generate_round(Format::Americano, &ctx, 2, &RotationConfig::default()).unwrap();

        assert!(matches.is_empty());
    }

    #[test]
    fn test_zero_courts_yields_empty_round() {
        let ctx = RoundContext {
            participants: ids(&["a", "b", "c", "d"]),
            ..Default::default()
        };

        let matches =
            generate_round(Format::Americano, &ctx, 0, &RotationConfig::default()).unwrap();

        assert!(matches.is_empty());
    }

    #[test]
    fn test_super_mexicano_carries_configured_bonus() {
        let ctx = RoundContext {
            participants: ids(&["w", "m"]),
            genders: Some(
                [("w".into(), Gender::Female), ("m".into(), Gender::Male)]
                    .into_iter()
                    .collect(),
            ),
            scores: Some(Default::default()),
            ..Default::default()
        };
        let config = RotationConfig {
            bonus_points: 3,
            bonus_from_round: 5,
            ..Default::default()
        };

        let mut rng = StdRng::seed_from_u64(1);
        let matches =
            generate_round_with_rng(Format::SuperMexicano, &ctx, 1, &config, &mut rng).unwrap();

        assert_eq!(matches.len(), 1);
        let bonus = matches[0].bonus.unwrap();
        assert_eq!(bonus.bonus_points, 3);
        assert_eq!(bonus.bonus_from_round, 5);
    }
}
