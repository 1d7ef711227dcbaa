//! The round's phase cycle and its completion semantics.
//!
//! Phases run in a fixed cyclical order:
//!
//! `setup → labor → oshikatsu-decision → oshikatsu-goods →
//! oshikatsu-placement → fansa-time → round-end → labor (next round)`
//!
//! `game-end` is terminal. Each phase carries a completion rule
//! ([`PhaseKind`]): the oshikatsu-cycle phases wait for every player's
//! completion flag, fansa time waits for the active player only, and
//! setup/round-end transition unconditionally. These are game rules,
//! not concurrency: the flags are evaluated synchronously on dispatch.

use serde::{Deserialize, Serialize};

/// Completion rule for a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Transition requires every player's completion flag.
    Simultaneous,
    /// Transition requires only the active player's completion flag.
    Sequential,
    /// Transitions unconditionally.
    Unconditional,
    /// No further transitions.
    Terminal,
}

/// A phase in the round cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Setup,
    Labor,
    OshikatsuDecision,
    OshikatsuGoods,
    OshikatsuPlacement,
    FansaTime,
    RoundEnd,
    GameEnd,
}

impl Phase {
    /// The completion rule for this phase.
    #[must_use]
    pub const fn kind(self) -> PhaseKind {
        match self {
            Phase::Labor
            | Phase::OshikatsuDecision
            | Phase::OshikatsuGoods
            | Phase::OshikatsuPlacement => PhaseKind::Simultaneous,
            Phase::FansaTime => PhaseKind::Sequential,
            Phase::Setup | Phase::RoundEnd => PhaseKind::Unconditional,
            Phase::GameEnd => PhaseKind::Terminal,
        }
    }

    /// The next phase in the fixed cycle. `RoundEnd` wraps to `Labor`
    /// (the caller increments the round); `GameEnd` has no successor.
    #[must_use]
    pub const fn next(self) -> Option<Phase> {
        match self {
            Phase::Setup => Some(Phase::Labor),
            Phase::Labor => Some(Phase::OshikatsuDecision),
            Phase::OshikatsuDecision => Some(Phase::OshikatsuGoods),
            Phase::OshikatsuGoods => Some(Phase::OshikatsuPlacement),
            Phase::OshikatsuPlacement => Some(Phase::FansaTime),
            Phase::FansaTime => Some(Phase::RoundEnd),
            Phase::RoundEnd => Some(Phase::Labor),
            Phase::GameEnd => None,
        }
    }

    /// Whether this phase is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::GameEnd)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Labor => "labor",
            Phase::OshikatsuDecision => "oshikatsu-decision",
            Phase::OshikatsuGoods => "oshikatsu-goods",
            Phase::OshikatsuPlacement => "oshikatsu-placement",
            Phase::FansaTime => "fansa-time",
            Phase::RoundEnd => "round-end",
            Phase::GameEnd => "game-end",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order() {
        let mut phase = Phase::Setup;
        let expected = [
            Phase::Labor,
            Phase::OshikatsuDecision,
            Phase::OshikatsuGoods,
            Phase::OshikatsuPlacement,
            Phase::FansaTime,
            Phase::RoundEnd,
            Phase::Labor, // wraps into the next round
        ];
        for want in expected {
            phase = phase.next().unwrap();
            assert_eq!(phase, want);
        }
    }

    #[test]
    fn test_classification() {
        assert_eq!(Phase::Labor.kind(), PhaseKind::Simultaneous);
        assert_eq!(Phase::OshikatsuDecision.kind(), PhaseKind::Simultaneous);
        assert_eq!(Phase::OshikatsuGoods.kind(), PhaseKind::Simultaneous);
        assert_eq!(Phase::OshikatsuPlacement.kind(), PhaseKind::Simultaneous);
        assert_eq!(Phase::FansaTime.kind(), PhaseKind::Sequential);
        assert_eq!(Phase::Setup.kind(), PhaseKind::Unconditional);
        assert_eq!(Phase::RoundEnd.kind(), PhaseKind::Unconditional);
        assert_eq!(Phase::GameEnd.kind(), PhaseKind::Terminal);
    }

    #[test]
    fn test_game_end_is_terminal() {
        assert!(Phase::GameEnd.is_terminal());
        assert_eq!(Phase::GameEnd.next(), None);
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Phase::OshikatsuDecision).unwrap();
        assert_eq!(json, "\"oshikatsu-decision\"");
        let back: Phase = serde_json::from_str("\"fansa-time\"").unwrap();
        assert_eq!(back, Phase::FansaTime);
    }
}
