//! # fansa-engine
//!
//! A test-play rules engine for a 1-4 player fan-activity tabletop
//! board game: eight rounds of labor, goods shopping, board placement,
//! and dice-driven "fansa time" scoring.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not shared state**: every operation takes a
//!    [`Session`] value and produces a new one via
//!    [`engine::apply`]. A rejected action returns an error and the
//!    caller's snapshot stays current. No partial state is ever
//!    observable.
//!
//! 2. **Injectable randomness**: all dice rolls and card draws flow
//!    through [`GameRng`], seedable in tests and entropy-backed in
//!    production. The RNG state rides inside the session, so a
//!    persisted game resumes its exact stream.
//!
//! 3. **Self-healing persistence**: loaded documents are validated and
//!    structurally repaired; repair restores shape but never invents
//!    piece or score data.
//!
//! ## Modules
//!
//! - `core`: players, pieces, phases, RNG, the session aggregate
//! - `board`: the 2x4 grid, capacity rules, adjacency/opposite lookups
//! - `ledger`: goods prices, purchases, kagebunshin creation
//! - `reward`: the six fixed labor reward cards
//! - `fansa`: the 56-card reveal deck and fansa-time scoring
//! - `engine`: the action type, `apply`, phase protocol, final results
//! - `validate`: invariant checks and best-effort repair
//! - `persist`: session store and round log collaborators

pub mod board;
pub mod core;
pub mod engine;
pub mod fansa;
pub mod ledger;
pub mod persist;
pub mod reward;
pub mod validate;

// Re-export commonly used types
pub use crate::board::{Board, OshiId, Spot, SpotId, SPOT_CAPACITY, SPOT_COUNT};
pub use crate::core::{
    Decision, GameRng, GameRngState, GoodsKind, Phase, PhaseKind, Piece, PieceId, Player, PlayerId,
    PlayerSpec, RoundResult, Session, TurnState, PIECES_PER_PLAYER, TOTAL_ROUNDS,
};
pub use crate::engine::{
    apply, create_kagebunshin, final_results, initialize_game, is_game_complete, purchase_goods,
    EngineError, FinalResults, GameAction, Standing,
};
pub use crate::fansa::{FansaCard, FansaReveal, Orientation, Rotation};
pub use crate::ledger::{KAGEBUNSHIN_PRICE, STARTING_MONEY};
pub use crate::persist::{
    JsonFileStore, JsonlRoundLog, RoundLogSink, SessionStore, StoreError,
};
pub use crate::reward::{RewardCard, RewardCardId};
pub use crate::validate::{repair, validate, ValidationIssue};
