//! Format-specific pairing strategies
//!
//! Every strategy is a pure function over an already rest-filtered pool;
//! none of them look at round history. Rest fairness lives entirely in the
//! selection step.

use crate::error::RotationError;
use crate::types::{BonusMeta, Gender, GenderMap, ParticipantId, ProposedMatch, ScoreMap};
use rand::seq::SliceRandom;
use rand::Rng;
use std::cmp::Ordering;

/// Americano / Team Americano: uniform random permutation, then adjacent
/// pairing. Yields `floor(pool / 2)` matches; an odd participant sits out.
pub fn pair_random<R: Rng>(pool: &[ParticipantId], rng: &mut R) -> Vec<ProposedMatch> {
    let mut order = pool.to_vec();
    order.shuffle(rng);
    pair_adjacent(&order)
}

/// Mexicano / Team Mexicano: rank 1 plays rank 2, rank 3 plays rank 4, and
/// so on down the score table.
pub fn pair_by_score(pool: &[ParticipantId], scores: &ScoreMap) -> Vec<ProposedMatch> {
    pair_adjacent(&sorted_by_score(pool, scores))
}

/// Mixed Americano: pair the i-th participant of one gender with the i-th of
/// the other, up to `courts` matches. Surplus on either side rests.
pub fn pair_mixed(
    pool: &[ParticipantId],
    genders: &GenderMap,
    courts: usize,
) -> Result<Vec<ProposedMatch>, RotationError> {
    let mut women = Vec::new();
    let mut men = Vec::new();
    for id in pool {
        match gender_of(genders, id)? {
            Gender::Female => women.push(id.clone()),
            Gender::Male => men.push(id.clone()),
        }
    }

    Ok(women
        .into_iter()
        .zip(men)
        .take(courts)
        .map(|(w, m)| ProposedMatch::new(w, m))
        .collect())
}

/// Mixicano: walk the score-sorted pool; each unmatched participant takes the
/// nearest lower-ranked participant of the opposite gender. Participants with
/// no opposite-gender partner left sit out; that is a normal outcome of an
/// unbalanced pool, not an error. At most `courts` matches survive, dropping
/// the lowest-ranked pairs first.
pub fn pair_mixed_by_score(
    pool: &[ParticipantId],
    genders: &GenderMap,
    scores: &ScoreMap,
    courts: usize,
) -> Result<Vec<ProposedMatch>, RotationError> {
    let order = sorted_by_score(pool, scores);
    let mut used = vec![false; order.len()];
    let mut matches = Vec::new();

    for i in 0..order.len() {
        if used[i] {
            continue;
        }
        let gender = gender_of(genders, &order[i])?;
        for j in (i + 1)..order.len() {
            if used[j] || gender_of(genders, &order[j])? == gender {
                continue;
            }
            used[i] = true;
            used[j] = true;
            matches.push(ProposedMatch::new(order[i].clone(), order[j].clone()));
            break;
        }
    }

    matches.truncate(courts);
    Ok(matches)
}

/// Super Mexicano: Mixicano pairing with bonus-point metadata on every match.
/// The metadata never changes which pairs are formed.
pub fn pair_mixed_by_score_with_bonus(
    pool: &[ParticipantId],
    genders: &GenderMap,
    scores: &ScoreMap,
    courts: usize,
    bonus: BonusMeta,
) -> Result<Vec<ProposedMatch>, RotationError> {
    let mut matches = pair_mixed_by_score(pool, genders, scores, courts)?;
    for m in &mut matches {
        m.bonus = Some(bonus);
    }
    Ok(matches)
}

/// Descending by score, stable: equal scores keep the pool's order.
fn sorted_by_score(pool: &[ParticipantId], scores: &ScoreMap) -> Vec<ParticipantId> {
    let mut order = pool.to_vec();
    order.sort_by(|a, b| {
        score_of(scores, b)
            .partial_cmp(&score_of(scores, a))
            .unwrap_or(Ordering::Equal)
    });
    order
}

fn score_of(scores: &ScoreMap, id: &ParticipantId) -> f64 {
    scores.get(id).copied().unwrap_or(0.0)
}

fn gender_of(genders: &GenderMap, id: &ParticipantId) -> Result<Gender, RotationError> {
    genders
        .get(id)
        .copied()
        .ok_or_else(|| RotationError::MissingGender(id.clone()))
}

fn pair_adjacent(order: &[ParticipantId]) -> Vec<ProposedMatch> {
    order
        .chunks_exact(2)
        .map(|pair| ProposedMatch::new(pair[0].clone(), pair[1].clone()))
        .collect()
}
