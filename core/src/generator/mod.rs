use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Board;
}

/// Faces for a tier before shuffling: each of the first `pair_count` symbols, twice.
pub fn ordered_faces(pair_count: PairCount) -> impl Iterator<Item = Face> {
    let pair_count = pair_count.min(ALPHABET.len().try_into().unwrap_or(PairCount::MAX));
    (0..pair_count)
        .chain(0..pair_count)
        .filter_map(Face::new)
}
