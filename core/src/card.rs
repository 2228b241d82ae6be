use serde::{Deserialize, Serialize};

use crate::*;

/// Visible state of a single card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    Hidden,
    Flipped,
    Matched,
}

impl CardState {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Flipped | Self::Matched)
    }

    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    position: Position,
    face: Face,
    state: CardState,
}

impl Card {
    pub(crate) const fn new(position: Position, face: Face) -> Self {
        Self {
            position,
            face,
            state: CardState::Hidden,
        }
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub const fn face(&self) -> Face {
        self.face
    }

    pub const fn glyph(&self) -> Symbol {
        self.face.glyph()
    }

    pub const fn state(&self) -> CardState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: CardState) {
        self.state = state;
    }
}
