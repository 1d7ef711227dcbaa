//! The tagged-union action type dispatched through `apply`.
//!
//! Every externally exposed mutating operation is a `GameAction`
//! variant. Callers own the session value; the engine holds no state of
//! its own, so an action plus a snapshot fully determines the next
//! snapshot.

use serde::{Deserialize, Serialize};

use crate::board::SpotId;
use crate::core::piece::{GoodsKind, PieceId};
use crate::core::player::{Decision, PlayerId};
use crate::reward::RewardCardId;

/// A mutating game operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameAction {
    /// Move a piece onto a board spot (placement phase).
    MovePiece { piece: PieceId, spot: SpotId },
    /// Pick a labor reward card (labor phase, once per round).
    SelectRewardCard {
        player: PlayerId,
        card: RewardCardId,
    },
    /// Roll the shared labor die and pay everyone out.
    RollDiceAndProcessLabor,
    /// Choose to participate in or rest out of the oshikatsu cycle.
    SelectOshikatsuDecision {
        player: PlayerId,
        decision: Decision,
    },
    /// Reveal all decisions and pay rest bonuses.
    RevealOshikatsuDecisions,
    /// Buy a goods kind for the first eligible piece.
    PurchaseGoods { player: PlayerId, kind: GoodsKind },
    /// Create a kagebunshin clone from a gift-carrying piece.
    CreateKagebunshin { player: PlayerId, piece: PieceId },
    /// Run the whole fansa-time scoring pass.
    ProcessFansaTime,
    /// Advance the phase machine one step, if its gate allows.
    NextPhase,
    /// Rotate the active player (sequential phases).
    NextTurn,
    /// Set or clear a player's phase-completion flag.
    SetPlayerActionCompleted { player: PlayerId, completed: bool },
    /// Finish the round: cleanup, then next round or game end.
    EndRound,
    /// Terminate the game immediately.
    EndGame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_tagging() {
        let action = GameAction::SelectRewardCard {
            player: PlayerId::new(1),
            card: RewardCardId::C,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"type\":\"select-reward-card\""));

        let back: GameAction = serde_json::from_str(&json).unwrap();
        assert_eq!(action, back);
    }

    #[test]
    fn test_no_arg_actions_round_trip() {
        for action in [
            GameAction::RollDiceAndProcessLabor,
            GameAction::NextPhase,
            GameAction::EndRound,
            GameAction::EndGame,
        ] {
            let json = serde_json::to_string(&action).unwrap();
            let back: GameAction = serde_json::from_str(&json).unwrap();
            assert_eq!(action, back);
        }
    }
}
