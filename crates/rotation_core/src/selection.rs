//! Active-pool selection under the rest constraint

use crate::rest::compute_rest_streaks;
use crate::types::{CompletedRound, ParticipantId};
use std::collections::HashSet;

/// Outcome of selecting who plays the next round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSelection {
    /// Participants chosen to play, `min(total, courts * 2)` of them.
    pub active: Vec<ParticipantId>,
    /// Everyone else, in the caller's iteration order.
    pub resting: Vec<ParticipantId>,
    /// Must-play participants dropped because courts could not hold them.
    /// Non-zero means the court count cannot honor the rest guarantee this
    /// round; the caller decides whether to warn the operator.
    pub forced_out: usize,
}

/// Select the participants who play the round being generated.
///
/// Two slots per court. Everyone whose rest streak has reached
/// `max_rest_streak` is forced in first; remaining slots go to the
/// longest-resting of the others. All ties are broken stably by the order of
/// `participants`.
pub fn select_active_pool(
    participants: &[ParticipantId],
    history: &[CompletedRound],
    courts: usize,
    max_rest_streak: u32,
) -> PoolSelection {
    let slots = courts * 2;
    let streaks = compute_rest_streaks(participants, history);

    let mut must_play: Vec<ParticipantId> = Vec::new();
    let mut others: Vec<ParticipantId> = Vec::new();
    for id in participants {
        if streaks[id] >= max_rest_streak {
            must_play.push(id.clone());
        } else {
            others.push(id.clone());
        }
    }

    let mut forced_out = 0;
    let active = if must_play.len() >= slots {
        // More forced-rest participants than capacity: keep the longest
        // resting, silently drop the rest (but report how many).
        must_play.sort_by(|a, b| streaks[b].cmp(&streaks[a]));
        forced_out = must_play.len() - slots;
        must_play.truncate(slots);
        must_play
    } else {
        others.sort_by(|a, b| streaks[b].cmp(&streaks[a]));
        let fill = slots - must_play.len();
        must_play.extend(others.into_iter().take(fill));
        must_play
    };

    let chosen: HashSet<&ParticipantId> = active.iter().collect();
    let resting = participants
        .iter()
        .filter(|id| !chosen.contains(id))
        .cloned()
        .collect();

    PoolSelection {
        active,
        resting,
        forced_out,
    }
}
