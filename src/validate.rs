//! Structural invariant checks and best-effort repair.
//!
//! `validate` reports every structural problem in a session snapshot;
//! `repair` restores structural shape (active player in range,
//! completion flags matching the player set, the canonical 8-spot
//! board) without inventing piece or score data. Persistence runs both
//! on load so drift in a stored document self-heals.

use thiserror::Error;

use crate::board::{Board, SPOT_CAPACITY, SPOT_COUNT};
use crate::core::player::PlayerId;
use crate::core::session::{Session, TurnState, PIECES_PER_PLAYER, TOTAL_ROUNDS};

/// A structural invariant violation found in a session snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("player count {0} outside 1-4")]
    PlayerCount(usize),

    #[error("active player {0} out of range")]
    ActivePlayerOutOfRange(PlayerId),

    #[error("round {0} outside 1-{TOTAL_ROUNDS}")]
    RoundOutOfRange(u8),

    #[error("board has {0} spots, expected {SPOT_COUNT}")]
    SpotCount(usize),

    #[error("spot at position {position} has id {found}")]
    SpotIdMismatch { position: usize, found: u8 },

    #[error("spot {spot} holds {count} pieces, capacity {SPOT_CAPACITY}")]
    SpotOverCapacity { spot: u8, count: usize },

    #[error("{player} has {count} base pieces, expected {PIECES_PER_PLAYER}")]
    BasePieceCount { player: PlayerId, count: usize },

    #[error("completion flags do not match the player set")]
    CompletionFlagDrift,
}

/// Check every structural invariant. An empty result means the snapshot
/// is structurally sound.
#[must_use]
pub fn validate(session: &Session) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let count = session.player_count();
    if !(1..=4).contains(&count) {
        issues.push(ValidationIssue::PlayerCount(count));
    }
    if session.active_player.index() >= count {
        issues.push(ValidationIssue::ActivePlayerOutOfRange(session.active_player));
    }
    if !(1..=TOTAL_ROUNDS).contains(&session.round) {
        issues.push(ValidationIssue::RoundOutOfRange(session.round));
    }

    let spots = session.board.spots();
    if spots.len() != SPOT_COUNT {
        issues.push(ValidationIssue::SpotCount(spots.len()));
    }
    for (position, spot) in spots.iter().enumerate() {
        if spot.id.0 as usize != position {
            issues.push(ValidationIssue::SpotIdMismatch {
                position,
                found: spot.id.0,
            });
        }
        if spot.occupants.len() > SPOT_CAPACITY {
            issues.push(ValidationIssue::SpotOverCapacity {
                spot: spot.id.0,
                count: spot.occupants.len(),
            });
        }
    }

    for player in &session.players {
        let base = player.base_piece_count();
        if base != PIECES_PER_PLAYER {
            issues.push(ValidationIssue::BasePieceCount {
                player: player.id,
                count: base,
            });
        }
    }

    let expected_keys: std::collections::BTreeSet<PlayerId> = PlayerId::all(count).collect();
    let actual_keys: std::collections::BTreeSet<PlayerId> =
        session.turn.completed.keys().copied().collect();
    if expected_keys != actual_keys {
        issues.push(ValidationIssue::CompletionFlagDrift);
    }

    issues
}

/// Restore structural shape.
///
/// - clamps the active player into range
/// - rebuilds completion flags and the waiting list from the player set,
///   keeping known flags and defaulting unknown players to incomplete
/// - rebuilds the board to the 8 canonical spots, preserving spot data
///   that matches by id
///
/// Piece lists, money, points, and history are never altered.
#[must_use]
pub fn repair(mut session: Session) -> Session {
    let count = session.player_count();

    if session.active_player.index() >= count && count > 0 {
        let clamped = PlayerId::new((count - 1) as u8);
        log::warn!(
            "repair: clamping active player {} to {clamped}",
            session.active_player
        );
        session.active_player = clamped;
    }

    let mut turn = TurnState::for_players(count.max(1));
    for player in PlayerId::all(count) {
        if session.turn.is_complete(player) {
            turn.mark(player, true);
        }
    }
    if turn != session.turn {
        log::warn!("repair: rebuilt completion flags for {count} players");
        session.turn = turn;
    }

    let rebuilt = Board::rebuilt_from(session.board.spots());
    if rebuilt != session.board {
        log::warn!("repair: rebuilt board to {SPOT_COUNT} canonical spots");
        session.board = rebuilt;
    }

    session
}
