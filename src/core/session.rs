//! The session aggregate: the single authoritative game snapshot.
//!
//! Every operation takes a `Session` value and produces a new one; there
//! is no shared mutable state. Round history lives in an `im::Vector` so
//! snapshots clone cheaply, and the RNG is carried inside the session so
//! a persisted game resumes its exact stream.

use chrono::{DateTime, Utc};
use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::phase::Phase;
use super::piece::{Piece, PieceId};
use super::player::{Decision, Player, PlayerId, PlayerSpec};
use super::rng::GameRng;
use crate::board::Board;
use crate::fansa::cards::FansaReveal;
use crate::ledger::STARTING_MONEY;
use crate::reward::RewardCardId;

/// Base pieces dealt to each player at initialization. Fixed for the
/// session's lifetime; clones are additional.
pub const PIECES_PER_PLAYER: usize = 4;

/// Total rounds in a game.
pub const TOTAL_ROUNDS: u8 = 8;

/// Per-player phase-completion bookkeeping.
///
/// `completed` holds a flag for every player in the session; `waiting`
/// is the derived list of players still to act, in player order. Both
/// reset on every phase transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub completed: FxHashMap<PlayerId, bool>,
    pub waiting: Vec<PlayerId>,
}

impl TurnState {
    /// Fresh turn state: nobody complete, everybody waiting.
    #[must_use]
    pub fn for_players(player_count: usize) -> Self {
        Self {
            completed: PlayerId::all(player_count).map(|p| (p, false)).collect(),
            waiting: PlayerId::all(player_count).collect(),
        }
    }

    /// Set a player's completion flag and rebuild the waiting list.
    pub fn mark(&mut self, player: PlayerId, done: bool) {
        let count = self.completed.len();
        self.completed.insert(player, done);
        self.waiting = PlayerId::all(count)
            .filter(|p| !self.completed.get(p).copied().unwrap_or(false))
            .collect();
    }

    /// Whether a player's flag is set.
    #[must_use]
    pub fn is_complete(&self, player: PlayerId) -> bool {
        self.completed.get(&player).copied().unwrap_or(false)
    }

    /// Whether every player's flag is set.
    #[must_use]
    pub fn all_complete(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Clear all flags and restore the full waiting list.
    pub fn reset(&mut self) {
        let count = self.completed.len();
        *self = TurnState::for_players(count);
    }
}

/// One player's labor outcome for a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborRecord {
    pub player: PlayerId,
    pub card: RewardCardId,
    pub die: u8,
    pub payout: u32,
}

/// One player's participate/rest choice for a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub player: PlayerId,
    pub decision: Decision,
}

/// One player's fansa-time score for a round, with a human-readable
/// breakdown per contribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player: PlayerId,
    pub points: u32,
    pub breakdown: Vec<String>,
}

/// Everything recorded about one round. Immutable once the round ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u8,
    pub labor: Vec<LaborRecord>,
    pub decisions: Vec<DecisionRecord>,
    pub scoring: Vec<ScoreRecord>,
}

impl RoundResult {
    /// An empty entry for the given round.
    #[must_use]
    pub fn new(round: u8) -> Self {
        Self {
            round,
            labor: Vec::new(),
            decisions: Vec::new(),
            scoring: Vec::new(),
        }
    }
}

/// The aggregate game snapshot.
///
/// Invariants (checked by `validate`, restored by `repair`):
/// - 1-4 players; `active_player` indexes into the player list
/// - round in 1..=8
/// - exactly 8 board spots, each holding at most 3 pieces
/// - each player owns exactly 4 non-clone pieces
/// - completion-flag keys match the player id set exactly
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub players: Vec<Player>,
    pub round: u8,
    pub phase: Phase,
    pub active_player: PlayerId,
    pub board: Board,
    pub turn: TurnState,
    pub reveal: Option<FansaReveal>,
    pub history: Vector<RoundResult>,
    pub created_at: DateTime<Utc>,
    pub rng: GameRng,
    next_piece_id: u32,
}

impl Session {
    /// Create a fresh session in the `Setup` phase.
    ///
    /// Each player receives [`STARTING_MONEY`] and [`PIECES_PER_PLAYER`]
    /// base pieces. Panics on a player count outside 1-4; the engine's
    /// `initialize_game` wrapper turns that into an error first.
    #[must_use]
    pub fn new(id: impl Into<String>, specs: &[PlayerSpec], rng: GameRng) -> Self {
        assert!(
            (1..=4).contains(&specs.len()),
            "player count must be 1-4, got {}",
            specs.len()
        );

        let mut next_piece_id = 0u32;
        let players: Vec<Player> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let player_id = PlayerId::new(i as u8);
                let mut player = Player::new(player_id, spec, STARTING_MONEY);
                for _ in 0..PIECES_PER_PLAYER {
                    player.pieces.push(Piece::new(PieceId::new(next_piece_id), player_id));
                    next_piece_id += 1;
                }
                player
            })
            .collect();

        let turn = TurnState::for_players(players.len());
        Self {
            id: id.into(),
            players,
            round: 1,
            phase: Phase::Setup,
            active_player: PlayerId::new(0),
            board: Board::new(),
            turn,
            reveal: None,
            history: Vector::new(),
            created_at: Utc::now(),
            rng,
            next_piece_id,
        }
    }

    /// Number of players in the session.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Get a player by id, mutably.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    /// Find a piece anywhere in the session, with its owner.
    #[must_use]
    pub fn find_piece(&self, id: PieceId) -> Option<(&Player, &Piece)> {
        self.players
            .iter()
            .find_map(|player| player.piece(id).map(|piece| (player, piece)))
    }

    /// Allocate the next piece id.
    pub(crate) fn alloc_piece_id(&mut self) -> PieceId {
        let id = PieceId::new(self.next_piece_id);
        self.next_piece_id += 1;
        id
    }

    /// The history entry for the current round, created on first use.
    pub(crate) fn current_round_entry_mut(&mut self) -> &mut RoundResult {
        let needs_entry = self
            .history
            .back()
            .map_or(true, |entry| entry.round != self.round);
        if needs_entry {
            self.history.push_back(RoundResult::new(self.round));
        }
        let last = self.history.len() - 1;
        self.history
            .get_mut(last)
            .expect("entry just ensured")
    }

    /// This round's labor payout for a player, if recorded.
    #[must_use]
    pub fn labor_payout(&self, player: PlayerId) -> Option<u32> {
        self.history
            .back()
            .filter(|entry| entry.round == self.round)
            .and_then(|entry| entry.labor.iter().find(|r| r.player == player))
            .map(|r| r.payout)
    }

    /// Round-end cleanup: board placements, clones, oshi markers, the
    /// reveal, and transient selections are cleared. Goods on surviving
    /// pieces, money, and points are kept.
    pub(crate) fn round_cleanup(&mut self) {
        for player in &mut self.players {
            player.pieces.retain(|piece| !piece.is_clone);
            for piece in &mut player.pieces {
                piece.spot = None;
            }
            player.selected_reward_card = None;
            player.decision = None;
        }
        self.board.clear_round();
        self.reveal = None;
    }

    /// Whether the session has reached the terminal phase.
    #[must_use]
    pub fn is_game_ended(&self) -> bool {
        self.phase.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::GoodsKind;
    use crate::board::SpotId;

    fn specs(n: usize) -> Vec<PlayerSpec> {
        (0..n)
            .map(|i| PlayerSpec::new(format!("P{i}"), "blue"))
            .collect()
    }

    fn session(n: usize) -> Session {
        Session::new("test", &specs(n), GameRng::new(42))
    }

    #[test]
    fn test_initialization_deals_pieces_and_money() {
        for n in 1..=4 {
            let s = session(n);
            assert_eq!(s.player_count(), n);
            assert_eq!(s.round, 1);
            assert_eq!(s.phase, Phase::Setup);
            for player in &s.players {
                assert_eq!(player.money, STARTING_MONEY);
                assert_eq!(player.base_piece_count(), PIECES_PER_PLAYER);
            }
        }
    }

    #[test]
    fn test_piece_ids_are_unique() {
        let s = session(4);
        let mut seen = std::collections::HashSet::new();
        for player in &s.players {
            for piece in &player.pieces {
                assert!(seen.insert(piece.id));
                assert_eq!(piece.owner, player.id);
            }
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_turn_state_waiting_order() {
        let mut turn = TurnState::for_players(3);
        assert_eq!(
            turn.waiting,
            vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]
        );

        turn.mark(PlayerId::new(1), true);
        assert_eq!(turn.waiting, vec![PlayerId::new(0), PlayerId::new(2)]);
        assert!(!turn.all_complete());

        // Un-marking restores the player in id order, not at the tail.
        turn.mark(PlayerId::new(1), false);
        assert_eq!(
            turn.waiting,
            vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]
        );
    }

    #[test]
    fn test_turn_state_all_complete_and_reset() {
        let mut turn = TurnState::for_players(2);
        turn.mark(PlayerId::new(0), true);
        turn.mark(PlayerId::new(1), true);
        assert!(turn.all_complete());

        turn.reset();
        assert!(!turn.all_complete());
        assert_eq!(turn.waiting.len(), 2);
    }

    #[test]
    fn test_current_round_entry_created_once() {
        let mut s = session(2);
        s.current_round_entry_mut().labor.push(LaborRecord {
            player: PlayerId::new(0),
            card: RewardCardId::A,
            die: 1,
            payout: 3,
        });
        s.current_round_entry_mut(); // must not create a second entry
        assert_eq!(s.history.len(), 1);
        assert_eq!(s.labor_payout(PlayerId::new(0)), Some(3));
        assert_eq!(s.labor_payout(PlayerId::new(1)), None);
    }

    #[test]
    fn test_round_cleanup_keeps_goods_drops_clones() {
        let mut s = session(1);
        let base_id = s.players[0].pieces[0].id;
        s.players[0].pieces[0].goods = Some(GoodsKind::Gift);
        s.players[0].pieces[0].spot = Some(SpotId::new(2));
        s.board.place(base_id, SpotId::new(2));

        let clone_id = s.alloc_piece_id();
        s.players[0]
            .pieces
            .push(Piece::clone_of(clone_id, PlayerId::new(0), GoodsKind::Gift));

        s.round_cleanup();

        let player = &s.players[0];
        assert_eq!(player.pieces.len(), PIECES_PER_PLAYER);
        assert_eq!(player.pieces[0].goods, Some(GoodsKind::Gift));
        assert!(player.pieces.iter().all(|p| p.spot.is_none()));
        assert!(s.board.spots().iter().all(|sp| sp.occupants.is_empty()));
        assert!(s.reveal.is_none());
    }

    #[test]
    fn test_serde_round_trip_is_exact_and_stable() {
        let s = session(3);
        let json = serde_json::to_string(&s).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);

        let json2 = serde_json::to_string(&back).unwrap();
        let back2: Session = serde_json::from_str(&json2).unwrap();
        assert_eq!(back, back2);
        assert_eq!(s.created_at, back2.created_at);
    }

    #[test]
    #[should_panic(expected = "player count")]
    fn test_zero_players_rejected() {
        let _ = Session::new("bad", &[], GameRng::new(1));
    }
}
