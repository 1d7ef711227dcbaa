//! The 2x4 board, capacity-bounded placement, and the grid lookups
//! scoring depends on.
//!
//! ## Layout
//!
//! Eight spots in two rows of four. For spot id `n`: row = `n / 4`,
//! col = `n % 4`:
//!
//! ```text
//! 0 1 2 3
//! 4 5 6 7
//! ```
//!
//! Each spot holds at most [`SPOT_CAPACITY`] pieces and, during fansa
//! time, at most one oshi marker. [`SpotId::adjacent`] and
//! [`SpotId::opposite`] are pure lookups used only by scoring.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::piece::PieceId;

/// Number of spots on the board.
pub const SPOT_COUNT: usize = 8;

/// Maximum pieces per spot.
pub const SPOT_CAPACITY: usize = 3;

/// Board spot identifier in `0..8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpotId(pub u8);

impl SpotId {
    /// Create a spot id. Panics if out of range; spot ids are fixed data.
    #[must_use]
    pub fn new(id: u8) -> Self {
        assert!((id as usize) < SPOT_COUNT, "spot id {id} out of range");
        Self(id)
    }

    /// Row within the 2x4 grid (0 or 1).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.0 / 4
    }

    /// Column within the 2x4 grid (0..4).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.0 % 4
    }

    /// Iterate over all spot ids in order.
    pub fn all() -> impl Iterator<Item = SpotId> {
        (0..SPOT_COUNT as u8).map(SpotId)
    }

    /// Up/down/left/right neighbors within the grid (2-4 results).
    #[must_use]
    pub fn adjacent(self) -> SmallVec<[SpotId; 4]> {
        let row = self.row() as i8;
        let col = self.col() as i8;
        let mut out = SmallVec::new();
        for (dr, dc) in [(-1i8, 0i8), (1, 0), (0, -1), (0, 1)] {
            let (r, c) = (row + dr, col + dc);
            if (0..2).contains(&r) && (0..4).contains(&c) {
                out.push(SpotId((r * 4 + c) as u8));
            }
        }
        out
    }

    /// The spot in the other row with the same column. Never equals `self`.
    #[must_use]
    pub const fn opposite(self) -> SpotId {
        SpotId((self.0 + 4) % 8)
    }
}

impl std::fmt::Display for SpotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Spot {}", self.0)
    }
}

/// One of the three fixed oshi markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OshiId {
    A,
    B,
    C,
}

impl OshiId {
    /// All oshi markers, in placement order.
    pub const ALL: [OshiId; 3] = [OshiId::A, OshiId::B, OshiId::C];
}

impl std::fmt::Display for OshiId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OshiId::A => "A",
            OshiId::B => "B",
            OshiId::C => "C",
        };
        write!(f, "Oshi {name}")
    }
}

/// A single board spot: its occupant pieces (in arrival order) and an
/// optional oshi marker assigned during fansa time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spot {
    pub id: SpotId,
    pub occupants: SmallVec<[PieceId; 3]>,
    pub oshi: Option<OshiId>,
}

impl Spot {
    /// Create an empty spot.
    #[must_use]
    pub fn new(id: SpotId) -> Self {
        Self {
            id,
            occupants: SmallVec::new(),
            oshi: None,
        }
    }

    /// Whether the spot is at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupants.len() >= SPOT_CAPACITY
    }
}

/// The fixed 8-spot board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    spots: Vec<Spot>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with the 8 canonical spots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            spots: SpotId::all().map(Spot::new).collect(),
        }
    }

    /// Rebuild a board from arbitrary spot data, keeping only entries
    /// whose id matches the canonical spot at that position. Used by
    /// structural repair.
    #[must_use]
    pub fn rebuilt_from(spots: &[Spot]) -> Self {
        let mut board = Board::new();
        for spot in spots {
            if (spot.id.0 as usize) < SPOT_COUNT {
                let slot = &mut board.spots[spot.id.0 as usize];
                *slot = spot.clone();
                slot.occupants.truncate(SPOT_CAPACITY);
            }
        }
        board
    }

    /// All spots, in id order.
    #[must_use]
    pub fn spots(&self) -> &[Spot] {
        &self.spots
    }

    /// Get a spot by id.
    #[must_use]
    pub fn spot(&self, id: SpotId) -> &Spot {
        &self.spots[id.0 as usize]
    }

    /// Get a spot by id, mutably.
    pub fn spot_mut(&mut self, id: SpotId) -> &mut Spot {
        &mut self.spots[id.0 as usize]
    }

    /// Place a piece on a spot, removing it from any prior spot first.
    ///
    /// Returns `false` (board unchanged) if the target is full. The move
    /// is atomic: the piece is never absent from both lists mid-move on
    /// any observable snapshot.
    pub fn place(&mut self, piece: PieceId, to: SpotId) -> bool {
        let already_here = self.spot(to).occupants.contains(&piece);
        if !already_here && self.spot(to).is_full() {
            return false;
        }
        self.remove_piece(piece);
        self.spot_mut(to).occupants.push(piece);
        true
    }

    /// Remove a piece from whatever spot holds it, if any.
    pub fn remove_piece(&mut self, piece: PieceId) {
        for spot in &mut self.spots {
            spot.occupants.retain(|p| *p != piece);
        }
    }

    /// Assign an oshi marker to a spot for this round.
    pub fn set_oshi(&mut self, oshi: OshiId, spot: SpotId) {
        self.spot_mut(spot).oshi = Some(oshi);
    }

    /// Clear all occupant lists and oshi markers (round-end cleanup).
    pub fn clear_round(&mut self) {
        for spot in &mut self.spots {
            spot.occupants.clear();
            spot.oshi = None;
        }
    }
}
