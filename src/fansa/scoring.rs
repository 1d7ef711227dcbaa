//! Fansa-time scoring: dice-driven oshi placement, the 6-point basic
//! split, and the three goods bonuses.
//!
//! For each oshi marker A, B, C in order, one die picks a spot off the
//! matching reveal card. At each placed oshi's spot:
//!
//! - **Basic split**: 6 points divided over the spot's occupants; with
//!   `k` occupants each gets `6 / k` and the first `6 % k` (in arrival
//!   order) get one extra.
//! - **Gift doubling**: a recipient who owns any gift-carrying piece has
//!   their basic share for that spot doubled.
//! - **Uchiwa**: +1 per uchiwa piece on a spot adjacent to the oshi.
//! - **Penlight**: +1 per penlight piece on the spot opposite the oshi.
//!
//! Contributions across the three placements are summed per player, and
//! every contribution is recorded as a human-readable breakdown line.

use serde::{Deserialize, Serialize};

use crate::board::{OshiId, SpotId};
use crate::core::piece::GoodsKind;
use crate::core::session::{ScoreRecord, Session};
use super::cards::FansaReveal;

/// Points divided among a spot's occupants by the basic split.
pub const BASIC_SPLIT_POINTS: u32 = 6;

/// Where one oshi landed this round, and the die that sent it there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OshiPlacement {
    pub oshi: OshiId,
    pub die: u8,
    pub spot: SpotId,
}

/// The basic-split shares for `occupants` pieces, in occupant order.
///
/// The shares always sum to exactly [`BASIC_SPLIT_POINTS`].
#[must_use]
pub fn basic_split(occupants: usize) -> Vec<u32> {
    assert!(occupants > 0, "basic split needs at least one occupant");
    let base = BASIC_SPLIT_POINTS / occupants as u32;
    let extra = (BASIC_SPLIT_POINTS as usize) % occupants;
    (0..occupants)
        .map(|i| base + u32::from(i < extra))
        .collect()
}

/// Roll the three oshi placements, score them, add the totals to each
/// player's points, and append this round's scoring records.
///
/// Returns the placements for logging.
pub(crate) fn run_fansa_time(session: &mut Session, reveal: &FansaReveal) -> Vec<OshiPlacement> {
    let mut placements = Vec::with_capacity(OshiId::ALL.len());
    for (card, oshi) in reveal.cards.iter().zip(OshiId::ALL) {
        let die = session.rng.roll_die();
        let spot = card.spot_for_die(die);
        session.board.set_oshi(oshi, spot);
        placements.push(OshiPlacement { oshi, die, spot });
        log::debug!("{oshi} placed at {spot} (die {die})");
    }

    let player_count = session.player_count();
    let mut totals = vec![0u32; player_count];
    let mut breakdowns: Vec<Vec<String>> = vec![Vec::new(); player_count];

    for placement in &placements {
        score_placement(session, *placement, &mut totals, &mut breakdowns);
    }

    for (player, &points) in session.players.iter_mut().zip(totals.iter()) {
        player.add_points(points);
        log::debug!("{} scored {points}pt this round", player.id);
    }

    let records: Vec<ScoreRecord> = session
        .players
        .iter()
        .map(|player| ScoreRecord {
            player: player.id,
            points: totals[player.id.index()],
            breakdown: std::mem::take(&mut breakdowns[player.id.index()]),
        })
        .collect();
    session.current_round_entry_mut().scoring = records;

    placements
}

fn score_placement(
    session: &Session,
    placement: OshiPlacement,
    totals: &mut [u32],
    breakdowns: &mut [Vec<String>],
) {
    let OshiPlacement { oshi, spot, .. } = placement;
    let occupants = &session.board.spot(spot).occupants;

    // Basic split, accumulated per owning player.
    if !occupants.is_empty() {
        let shares = basic_split(occupants.len());
        let mut spot_basic = vec![0u32; totals.len()];
        for (&piece_id, &share) in occupants.iter().zip(shares.iter()) {
            if let Some((owner, _)) = session.find_piece(piece_id) {
                spot_basic[owner.id.index()] += share;
            }
        }

        for player in &session.players {
            let base = spot_basic[player.id.index()];
            if base == 0 {
                continue;
            }
            let awarded = if player.owns_goods(GoodsKind::Gift) {
                breakdowns[player.id.index()].push(format!(
                    "{oshi} at {spot}: basic split {base}pt, doubled by gift to {}pt",
                    base * 2
                ));
                base * 2
            } else {
                breakdowns[player.id.index()]
                    .push(format!("{oshi} at {spot}: basic split {base}pt"));
                base
            };
            totals[player.id.index()] += awarded;
        }
    }

    // Uchiwa cheer from adjacent spots.
    for adjacent in spot.adjacent() {
        for &piece_id in &session.board.spot(adjacent).occupants {
            if let Some((owner, piece)) = session.find_piece(piece_id) {
                if piece.goods == Some(GoodsKind::Uchiwa) {
                    totals[owner.id.index()] += 1;
                    breakdowns[owner.id.index()]
                        .push(format!("{oshi} at {spot}: uchiwa cheer from {adjacent} +1pt"));
                }
            }
        }
    }

    // Penlight glow from the opposite spot.
    let opposite = spot.opposite();
    for &piece_id in &session.board.spot(opposite).occupants {
        if let Some((owner, piece)) = session.find_piece(piece_id) {
            if piece.goods == Some(GoodsKind::Penlight) {
                totals[owner.id.index()] += 1;
                breakdowns[owner.id.index()]
                    .push(format!("{oshi} at {spot}: penlight glow from {opposite} +1pt"));
            }
        }
    }
}
