use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Ordered card slots of one session.
///
/// Every face on the board appears exactly twice, and the faces in use are the
/// first `pair_count` entries of [`ALPHABET`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Builds a board from an explicit face layout, checking the pair invariant.
    pub fn from_faces(faces: &[Face]) -> Result<Self> {
        if !is_paired_prefix(faces) {
            return Err(GameError::InvalidBoard);
        }
        Ok(Self::from_faces_unchecked(faces.iter().copied()))
    }

    /// Same as [`Board::from_faces`], taking glyphs such as `"🍎"`.
    pub fn from_glyphs(glyphs: &[&str]) -> Result<Self> {
        let faces = glyphs
            .iter()
            .map(|glyph| Face::from_glyph(glyph).ok_or(GameError::InvalidBoard))
            .collect::<Result<Vec<_>>>()?;
        Self::from_faces(&faces)
    }

    pub(crate) fn from_faces_unchecked(faces: impl IntoIterator<Item = Face>) -> Self {
        let cards = faces
            .into_iter()
            .zip(0..=Position::MAX)
            .map(|(face, position)| Card::new(position, face))
            .collect();
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pair_count(&self) -> PairCount {
        (self.cards.len() / 2).try_into().unwrap_or(PairCount::MAX)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.cards.iter().map(Card::face)
    }

    pub fn get(&self, position: Position) -> Option<&Card> {
        self.cards.get(usize::from(position))
    }

    pub fn validate_position(&self, position: Position) -> Result<Position> {
        if usize::from(position) < self.cards.len() {
            Ok(position)
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    pub fn matched_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|card| card.state().is_matched())
            .count()
    }

    pub(crate) fn set_state(&mut self, position: Position, state: CardState) {
        self.cards[usize::from(position)].set_state(state);
    }
}

impl Index<Position> for Board {
    type Output = Card;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cards[usize::from(position)]
    }
}

fn is_paired_prefix(faces: &[Face]) -> bool {
    if faces.is_empty() || faces.len() % 2 != 0 || faces.len() / 2 > ALPHABET.len() {
        return false;
    }
    if faces.len() > usize::from(Position::MAX) + 1 {
        return false;
    }

    let mut counts = [0u8; ALPHABET.len()];
    for face in faces {
        let slot = &mut counts[usize::from(face.index())];
        *slot = slot.saturating_add(1);
    }

    let pair_count = faces.len() / 2;
    counts
        .iter()
        .enumerate()
        .all(|(index, &count)| count == if index < pair_count { 2 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_glyphs_assigns_positions_in_order() {
        let board = Board::from_glyphs(&["🍎", "🍌", "🍎", "🍌"]).unwrap();

        assert_eq!(board.len(), 4);
        assert_eq!(board.pair_count(), 2);
        for (index, card) in board.iter().enumerate() {
            assert_eq!(usize::from(card.position()), index);
            assert_eq!(card.state(), CardState::Hidden);
        }
        assert_eq!(board[1].glyph(), "🍌");
    }

    #[test]
    fn from_glyphs_rejects_broken_pairs() {
        assert_eq!(
            Board::from_glyphs(&["🍎", "🍎", "🍎", "🍌"]),
            Err(GameError::InvalidBoard)
        );
        assert_eq!(Board::from_glyphs(&["🍎", "🍎", "🍌"]), Err(GameError::InvalidBoard));
        assert_eq!(Board::from_glyphs(&[]), Err(GameError::InvalidBoard));
    }

    #[test]
    fn from_glyphs_requires_alphabet_prefix() {
        // 🍇 is the third symbol, a two-pair board must use 🍎 and 🍌
        assert_eq!(
            Board::from_glyphs(&["🍎", "🍇", "🍎", "🍇"]),
            Err(GameError::InvalidBoard)
        );
    }

    #[test]
    fn validate_position_checks_bounds() {
        let board = Board::from_glyphs(&["🍎", "🍎"]).unwrap();

        assert_eq!(board.validate_position(1), Ok(1));
        assert_eq!(board.validate_position(2), Err(GameError::InvalidPosition));
        assert!(board.get(2).is_none());
    }
}
