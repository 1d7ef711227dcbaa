//! Deterministic random number generation for dice and card draws.
//!
//! All non-determinism in the engine (die rolls, fansa card draws,
//! orientations, rotations) flows through [`GameRng`]:
//!
//! - **Seedable**: tests construct it from a fixed seed and get a
//!   reproducible stream of rolls and draws.
//! - **Serializable**: [`GameRngState`] captures seed plus stream
//!   position in O(1), so a persisted session resumes the exact stream.
//! - **Entropy-backed in production**: [`GameRng::from_entropy`] wires
//!   it to an OS-seeded source.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG backing every dice roll and card draw.
///
/// Uses ChaCha8 for speed while keeping a compact, restorable state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GameRngState", into = "GameRngState")]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy (production wiring).
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Roll one six-sided die, returning a face in `1..=6`.
    pub fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Draw `count` distinct indices from `0..pool`, uniformly at random.
    ///
    /// Returns the drawn indices in draw order. Panics if `count > pool`;
    /// that is a caller bug, not a game state.
    pub fn draw_distinct(&mut self, count: usize, pool: usize) -> Vec<usize> {
        assert!(count <= pool, "cannot draw {count} distinct from {pool}");
        let mut indices: Vec<usize> = (0..pool).collect();
        self.shuffle(&mut indices);
        indices.truncate(count);
        indices
    }

    /// Capture the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// The ChaCha8 word position gives O(1) capture regardless of how many
/// values have been generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed.
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter).
    pub word_pos: u128,
}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        GameRng::from_state(&state)
    }
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_dice() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.roll_die(), b.roll_die());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = GameRng::new(1);
        let mut b = GameRng::new(2);
        let seq_a: Vec<_> = (0..20).map(|_| a.roll_die()).collect();
        let seq_b: Vec<_> = (0..20).map(|_| b.roll_die()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_die_faces_in_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..1000 {
            let face = rng.roll_die();
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn test_draw_distinct() {
        let mut rng = GameRng::new(42);
        let drawn = rng.draw_distinct(3, 56);
        assert_eq!(drawn.len(), 3);
        assert!(drawn.iter().all(|&i| i < 56));
        assert_ne!(drawn[0], drawn[1]);
        assert_ne!(drawn[0], drawn[2]);
        assert_ne!(drawn[1], drawn[2]);
    }

    #[test]
    #[should_panic(expected = "cannot draw")]
    fn test_draw_distinct_overdraw_panics() {
        let mut rng = GameRng::new(42);
        let _ = rng.draw_distinct(4, 3);
    }

    #[test]
    fn test_state_resumes_stream() {
        let mut rng = GameRng::new(42);
        for _ in 0..57 {
            rng.roll_die();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.roll_die()).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.roll_die()).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut rng = GameRng::new(9);
        rng.roll_die();
        rng.roll_die();

        let json = serde_json::to_string(&rng).unwrap();
        let mut back: GameRng = serde_json::from_str(&json).unwrap();
        assert_eq!(rng, back);
        assert_eq!(rng.roll_die(), back.roll_die());
    }
}
