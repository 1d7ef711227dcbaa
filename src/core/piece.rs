//! Otaku pieces and purchasable goods.
//!
//! Every player starts with exactly 4 base pieces and keeps them for the
//! whole session. Kagebunshin clones are extra pieces created from a
//! gift-carrying piece and destroyed at round end.
//!
//! A piece must carry goods before it can be placed on a board spot.

use serde::{Deserialize, Serialize};

use crate::board::SpotId;
use crate::core::player::PlayerId;

/// Unique piece identifier, allocated from the session's counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Create a new piece ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece {}", self.0)
    }
}

/// The three purchasable goods kinds.
///
/// - `Uchiwa` (fan cheer): +1 point when adjacent to a placed oshi.
/// - `Penlight` (glow stick): +1 point from the spot opposite an oshi.
/// - `Gift`: doubles the owner's basic split and enables kagebunshin
///   creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoodsKind {
    Uchiwa,
    Penlight,
    Gift,
}

impl GoodsKind {
    /// All goods kinds, in display order.
    pub const ALL: [GoodsKind; 3] = [GoodsKind::Uchiwa, GoodsKind::Penlight, GoodsKind::Gift];

    /// Purchase price in game currency.
    #[must_use]
    pub const fn price(self) -> u32 {
        match self {
            GoodsKind::Uchiwa | GoodsKind::Penlight => 3,
            GoodsKind::Gift => 5,
        }
    }
}

impl std::fmt::Display for GoodsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GoodsKind::Uchiwa => "uchiwa",
            GoodsKind::Penlight => "penlight",
            GoodsKind::Gift => "gift",
        };
        write!(f, "{name}")
    }
}

/// A player-owned token.
///
/// `spot` is only ever `Some` while `goods` is `Some`; the placement
/// engine rejects moves of goods-less pieces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub owner: PlayerId,
    pub spot: Option<SpotId>,
    pub goods: Option<GoodsKind>,
    pub is_clone: bool,
}

impl Piece {
    /// Create a base (non-clone) piece with no goods and no placement.
    #[must_use]
    pub fn new(id: PieceId, owner: PlayerId) -> Self {
        Self {
            id,
            owner,
            spot: None,
            goods: None,
            is_clone: false,
        }
    }

    /// Create a kagebunshin clone carrying the source piece's goods kind.
    #[must_use]
    pub fn clone_of(id: PieceId, owner: PlayerId, goods: GoodsKind) -> Self {
        Self {
            id,
            owner,
            spot: None,
            goods: Some(goods),
            is_clone: true,
        }
    }

    /// Whether this piece may be assigned a board spot.
    #[must_use]
    pub fn is_placeable(&self) -> bool {
        self.goods.is_some()
    }

    /// Whether this piece can receive a newly purchased goods kind.
    #[must_use]
    pub fn is_goods_eligible(&self) -> bool {
        self.goods.is_none() && self.spot.is_none()
    }
}
