//! Rest-streak accounting

use crate::types::{CompletedRound, ParticipantId};
use std::collections::HashMap;

/// Count, for each participant, the consecutive most-recent rounds in which
/// they did not play.
///
/// Walks `history` from the newest round backward and stops counting at the
/// first round the participant appears in. A participant who played the
/// newest round gets 0; one who never appears gets `history.len()`.
///
/// Recomputed fresh on every call since the caller may edit history between
/// calls; identical inputs always give identical output.
pub fn compute_rest_streaks(
    participants: &[ParticipantId],
    history: &[CompletedRound],
) -> HashMap<ParticipantId, u32> {
    let mut streaks = HashMap::with_capacity(participants.len());

    for id in participants {
        let mut streak = 0u32;
        for round in history.iter().rev() {
            if round.involves(id) {
                break;
            }
            streak += 1;
        }
        streaks.insert(id.clone(), streak);
    }

    streaks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayedMatch;

    fn round_of(pairs: &[(&str, &str)]) -> CompletedRound {
        CompletedRound {
            matches: pairs
                .iter()
                .map(|(a, b)| PlayedMatch {
                    participants: vec![(*a).into(), (*b).into()],
                })
                .collect(),
        }
    }

    fn pid(name: &str) -> ParticipantId {
        name.into()
    }

    fn ids(names: &[&str]) -> Vec<ParticipantId> {
        names.iter().map(|n| (*n).into()).collect()
    }

    #[test]
    fn test_played_last_round_has_zero_streak() {
        let history = vec![round_of(&[("a", "b")]), round_of(&[("a", "c")])];
        let streaks = compute_rest_streaks(&ids(&["a", "c"]), &history);

        assert_eq!(streaks[&pid("a")], 0);
        assert_eq!(streaks[&pid("c")], 0);
    }

    #[test]
    fn test_streak_counts_trailing_absences_only() {
        // b played round 1, then rested rounds 2 and 3
        let history = vec![
            round_of(&[("a", "b")]),
            round_of(&[("a", "c")]),
            round_of(&[("a", "d")]),
        ];
        let streaks = compute_rest_streaks(&ids(&["b"]), &history);

        assert_eq!(streaks[&pid("b")], 2);
    }

    #[test]
    fn test_never_played_gets_full_history_length() {
        let history = vec![round_of(&[("a", "b")]), round_of(&[("a", "b")])];
        let streaks = compute_rest_streaks(&ids(&["z"]), &history);

        assert_eq!(streaks[&pid("z")], 2);
    }

    #[test]
    fn test_empty_history_gives_zero_for_everyone() {
        let streaks = compute_rest_streaks(&ids(&["a", "b"]), &[]);

        assert!(streaks.values().all(|&s| s == 0));
    }

    #[test]
    fn test_idempotent_for_identical_inputs() {
        let history = vec![round_of(&[("a", "b")]), round_of(&[("c", "d")])];
        let pool = ids(&["a", "b", "c", "d", "e"]);

        let first = compute_rest_streaks(&pool, &history);
        let second = compute_rest_streaks(&pool, &history);

        assert_eq!(first, second);
    }
}
