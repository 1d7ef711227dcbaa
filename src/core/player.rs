//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Sessions hold 1-4 players; the id is the
//! player's index in the session's player list, so list order and id
//! order always agree.
//!
//! ## Player
//!
//! Persistent state (money, points, pieces) plus the per-round transient
//! selections (reward card, participate/rest decision) that the phase
//! machine clears on the relevant transitions.

use serde::{Deserialize, Serialize};

use super::piece::{GoodsKind, Piece, PieceId};
use crate::reward::RewardCardId;

/// Player identifier. The first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a session with `player_count` players.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A player's choice for the oshikatsu cycle: join in, or sit out for a
/// money bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Take part in the goods and placement phases.
    Participate,
    /// Skip the cycle; pays a bonus equal to this round's labor payout.
    Rest,
}

/// Name and color supplied by the caller when a game is initialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub color: String,
}

impl PlayerSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// A player in the session.
///
/// `money` never goes negative; all adjustments go through
/// [`Player::adjust_money`], which clamps at zero. `selected_reward_card`
/// and `decision` are round-scoped and cleared by phase transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: String,
    pub money: u32,
    pub points: u32,
    pub pieces: Vec<Piece>,
    pub selected_reward_card: Option<RewardCardId>,
    pub decision: Option<Decision>,
}

impl Player {
    /// Create a player with the given starting money and no pieces.
    #[must_use]
    pub fn new(id: PlayerId, spec: &PlayerSpec, starting_money: u32) -> Self {
        Self {
            id,
            name: spec.name.clone(),
            color: spec.color.clone(),
            money: starting_money,
            points: 0,
            pieces: Vec::new(),
            selected_reward_card: None,
            decision: None,
        }
    }

    /// Adjust money by a signed delta, clamping the result at zero.
    pub fn adjust_money(&mut self, delta: i64) {
        let next = i64::from(self.money) + delta;
        self.money = u32::try_from(next.max(0)).unwrap_or(u32::MAX);
    }

    /// Add points (points only ever increase during play).
    pub fn add_points(&mut self, points: u32) {
        self.points += points;
    }

    /// Find one of this player's pieces by id.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    /// Find one of this player's pieces by id, mutably.
    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    /// Count of non-clone pieces. Exactly 4 for the session's lifetime.
    #[must_use]
    pub fn base_piece_count(&self) -> usize {
        self.pieces.iter().filter(|p| !p.is_clone).count()
    }

    /// Whether any of this player's pieces carries the given goods kind.
    #[must_use]
    pub fn owns_goods(&self, kind: GoodsKind) -> bool {
        self.pieces.iter().any(|p| p.goods == Some(kind))
    }
}
