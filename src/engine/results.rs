//! Final ranking and aggregate statistics.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;
use crate::core::session::{Session, TOTAL_ROUNDS};

/// One row of the final standings, ordered by points descending.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub points: u32,
}

/// The end-of-game report.
///
/// Every player tied at the maximum score is a winner. `average_score`
/// is rounded to the nearest integer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResults {
    pub rankings: Vec<Standing>,
    pub winners: Vec<PlayerId>,
    pub highest_score: u32,
    pub average_score: u32,
    pub total_rounds: u8,
}

/// Compute the final standings for a session.
#[must_use]
pub fn final_results(session: &Session) -> FinalResults {
    let mut rankings: Vec<Standing> = session
        .players
        .iter()
        .map(|p| Standing {
            player: p.id,
            name: p.name.clone(),
            points: p.points,
        })
        .collect();
    rankings.sort_by(|a, b| b.points.cmp(&a.points).then(a.player.cmp(&b.player)));

    let highest_score = rankings.first().map_or(0, |s| s.points);
    let winners = rankings
        .iter()
        .filter(|s| s.points == highest_score)
        .map(|s| s.player)
        .collect();

    let total: u32 = rankings.iter().map(|s| s.points).sum();
    let count = rankings.len() as u32;
    let average_score = if count == 0 {
        0
    } else {
        (total + count / 2) / count
    };

    FinalResults {
        rankings,
        winners,
        highest_score,
        average_score,
        total_rounds: TOTAL_ROUNDS,
    }
}
