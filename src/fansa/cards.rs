//! The fansa card deck and the round's random reveal.
//!
//! The canonical deck is every unordered 3-subset of the 8 board spots
//! (8 choose 3 = 56 cards), each triple stored sorted ascending. A
//! round's reveal draws 3 distinct cards and independently randomizes
//! each card's orientation and rotation.
//!
//! During scoring, a die face picks one spot out of a card's triple via
//! [`spot_index_for_die`]: faces 1-2 map to index 0, 3-4 to index 1,
//! 5-6 to index 2.

use serde::{Deserialize, Serialize};

use crate::board::SpotId;
use crate::core::rng::GameRng;

/// Number of cards in the canonical deck (8 choose 3).
pub const DECK_SIZE: usize = 56;

/// Which side of the physical card faces up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Front,
    Back,
}

impl Orientation {
    fn from_index(i: usize) -> Self {
        match i {
            0 => Orientation::Front,
            _ => Orientation::Back,
        }
    }
}

/// Quarter-turn rotation of the physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    fn from_index(i: usize) -> Self {
        match i {
            0 => Rotation::R0,
            1 => Rotation::R90,
            2 => Rotation::R180,
            _ => Rotation::R270,
        }
    }
}

/// A fansa card: a triple of distinct spots plus the random presentation
/// assigned when the card was drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FansaCard {
    /// Index of this card's triple within the canonical deck.
    pub id: u8,
    /// Three distinct spot ids, sorted ascending.
    pub spots: [SpotId; 3],
    pub orientation: Orientation,
    pub rotation: Rotation,
}

impl FansaCard {
    /// The spot a die face selects on this card.
    #[must_use]
    pub fn spot_for_die(&self, die: u8) -> SpotId {
        self.spots[spot_index_for_die(die)]
    }
}

/// The three cards revealed for a round, pairwise distinct by triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FansaReveal {
    pub cards: [FansaCard; 3],
}

/// Enumerate the canonical deck: all 56 ascending spot triples.
#[must_use]
pub fn deck() -> Vec<[SpotId; 3]> {
    let mut triples = Vec::with_capacity(DECK_SIZE);
    for a in 0..8u8 {
        for b in (a + 1)..8 {
            for c in (b + 1)..8 {
                triples.push([SpotId(a), SpotId(b), SpotId(c)]);
            }
        }
    }
    triples
}

/// Draw a round's reveal: 3 distinct cards, each with an independently
/// random orientation and rotation.
#[must_use]
pub fn prepare_reveal(rng: &mut GameRng) -> FansaReveal {
    let triples = deck();
    let drawn = rng.draw_distinct(3, triples.len());

    let mut cards = [FansaCard {
        id: 0,
        spots: triples[0],
        orientation: Orientation::Front,
        rotation: Rotation::R0,
    }; 3];

    for (slot, &index) in cards.iter_mut().zip(drawn.iter()) {
        *slot = FansaCard {
            id: index as u8,
            spots: triples[index],
            orientation: Orientation::from_index(rng.gen_range_usize(0..2)),
            rotation: Rotation::from_index(rng.gen_range_usize(0..4)),
        };
    }

    FansaReveal { cards }
}

/// Map a die face to an index into a card's spot triple.
///
/// Faces outside 1-6 are a caller bug, not a game state.
#[must_use]
pub fn spot_index_for_die(die: u8) -> usize {
    assert!((1..=6).contains(&die), "die face {die} out of range");
    ((die - 1) / 2) as usize
}
