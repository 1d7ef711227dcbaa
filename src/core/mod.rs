//! Core types: players, pieces, phases, the RNG, and the session
//! aggregate.

pub mod phase;
pub mod piece;
pub mod player;
pub mod rng;
pub mod session;

pub use phase::{Phase, PhaseKind};
pub use piece::{GoodsKind, Piece, PieceId};
pub use player::{Decision, Player, PlayerId, PlayerSpec};
pub use rng::{GameRng, GameRngState};
pub use session::{
    DecisionRecord, LaborRecord, RoundResult, ScoreRecord, Session, TurnState, PIECES_PER_PLAYER,
    TOTAL_ROUNDS,
};
