use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Generation strategy that lays out the tier's pairs and applies a seeded Fisher–Yates shuffle.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Board {
        let mut faces: Vec<Face> = ordered_faces(difficulty.pair_count()).collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        fisher_yates(&mut faces, &mut rng);

        log::debug!(
            "generated {:?} board with {} cards (seed {})",
            difficulty,
            faces.len(),
            self.seed
        );
        Board::from_faces_unchecked(faces)
    }
}

/// In-place uniform shuffle: walks from the last index down to 1, swapping
/// each slot with a uniformly chosen index in `[0, i]`.
pub fn fisher_yates<T>(items: &mut [T], rng: &mut SmallRng) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
