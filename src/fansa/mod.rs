//! Fansa time: the round's combinatorial card reveal and the scoring
//! that follows from it.

pub mod cards;
pub mod scoring;

pub use cards::{
    deck, prepare_reveal, spot_index_for_die, FansaCard, FansaReveal, Orientation, Rotation,
    DECK_SIZE,
};
pub use scoring::{basic_split, OshiPlacement, BASIC_SPLIT_POINTS};
