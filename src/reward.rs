//! The labor phase's six fixed reward cards.
//!
//! Each card maps die faces 1-6 to a payout. Players pick a card, one
//! shared die is rolled, and everyone is paid from their own card at
//! that face. The catalog is engine data; it is never mutated.

use serde::{Deserialize, Serialize};

/// Identifier for one of the six reward cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardCardId {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl RewardCardId {
    /// All card ids, in catalog order.
    pub const ALL: [RewardCardId; 6] = [
        RewardCardId::A,
        RewardCardId::B,
        RewardCardId::C,
        RewardCardId::D,
        RewardCardId::E,
        RewardCardId::F,
    ];
}

impl std::fmt::Display for RewardCardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RewardCardId::A => "A",
            RewardCardId::B => "B",
            RewardCardId::C => "C",
            RewardCardId::D => "D",
            RewardCardId::E => "E",
            RewardCardId::F => "F",
        };
        write!(f, "{name}")
    }
}

/// A reward card: payouts indexed by die face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardCard {
    pub id: RewardCardId,
    pub name: &'static str,
    /// Payout for faces 1-6, at indices 0-5.
    pub payouts: [u32; 6],
}

/// The fixed six-card catalog.
pub const CATALOG: [RewardCard; 6] = [
    RewardCard {
        id: RewardCardId::A,
        name: "Morning Shift",
        payouts: [3, 2, 1, 0, 0, 0],
    },
    RewardCard {
        id: RewardCardId::B,
        name: "Night Shift",
        payouts: [0, 0, 0, 1, 2, 3],
    },
    RewardCard {
        id: RewardCardId::C,
        name: "Part-Timer",
        payouts: [1, 1, 1, 1, 1, 1],
    },
    RewardCard {
        id: RewardCardId::D,
        name: "Weekend Gig",
        payouts: [0, 0, 3, 3, 0, 0],
    },
    RewardCard {
        id: RewardCardId::E,
        name: "Big Break",
        payouts: [5, 0, 0, 0, 0, 5],
    },
    RewardCard {
        id: RewardCardId::F,
        name: "Odd Jobs",
        payouts: [0, 2, 0, 2, 0, 2],
    },
];

/// Look up a card in the catalog.
#[must_use]
pub fn card(id: RewardCardId) -> &'static RewardCard {
    &CATALOG[id as usize]
}

/// Payout for a card at a die face.
///
/// Faces outside 1-6 are a caller bug, not a game state.
#[must_use]
pub fn payout(id: RewardCardId, die: u8) -> u32 {
    assert!((1..=6).contains(&die), "die face {die} out of range");
    card(id).payouts[(die - 1) as usize]
}
