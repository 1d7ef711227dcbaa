//! Engine error types.
//!
//! Expected rule violations come back as `EngineError` values from the
//! relevant operation with the session left unchanged; they are never
//! panics. Structural drift in a loaded session is handled by the
//! `validate` module instead, and out-of-contract caller bugs (a die
//! face outside 1-6) are asserts.

use thiserror::Error;

use crate::core::phase::Phase;
use crate::core::piece::PieceId;
use crate::core::player::PlayerId;

/// A rejected operation. The session snapshot is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("operation is not legal during the {actual} phase")]
    WrongPhase { actual: Phase },

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),

    #[error("{player} needs {needed} money but has {available}")]
    InsufficientFunds {
        player: PlayerId,
        needed: u32,
        available: u32,
    },

    #[error("{0} has no piece eligible for new goods")]
    NoEligiblePiece(PlayerId),

    #[error("{0} does not carry the gift goods kind")]
    NotGiftPiece(PieceId),

    #[error("{0} already selected a reward card this round")]
    AlreadySelected(PlayerId),

    #[error("not every player has selected a reward card")]
    SelectionsIncomplete,

    #[error("not every player has made a decision")]
    DecisionsIncomplete,

    #[error("the {0} phase is not complete")]
    PhaseNotComplete(Phase),

    #[error("the game has ended")]
    GameOver,

    #[error("player count must be 1-4, got {0}")]
    InvalidPlayerCount(usize),
}

impl EngineError {
    /// Whether this is a user-input violation the UI should surface and
    /// auto-dismiss, as opposed to a caller programming error.
    #[must_use]
    pub fn is_user_input(&self) -> bool {
        !matches!(self, EngineError::InvalidPlayerCount(_))
    }
}
