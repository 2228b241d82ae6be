use serde::{Deserialize, Serialize};

/// Index of a card slot on the board.
pub type Position = u8;

/// Count type used for pair counts and match counts.
pub type PairCount = u8;

/// Printable card face.
pub type Symbol = &'static str;

/// Fixed symbol alphabet, boards always use a prefix of it.
pub const ALPHABET: [Symbol; 12] = [
    "🍎", "🍌", "🍇", "🍒", "🍉", "🍋", "🍓", "🥝", "🍍", "🥥", "🍑", "🍐",
];

const _: () = assert!(ALPHABET.len() >= Difficulty::Hard.pair_count() as usize);

/// Face value of a card, stored as an index into [`ALPHABET`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Face(u8);

impl Face {
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < ALPHABET.len() {
            Some(Self(index))
        } else {
            None
        }
    }

    pub fn from_glyph(glyph: &str) -> Option<Self> {
        ALPHABET
            .iter()
            .position(|&symbol| symbol == glyph)
            .and_then(|index| Self::new(index.try_into().ok()?))
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn glyph(self) -> Symbol {
        ALPHABET[self.0 as usize]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub const ALL: [Self; 2] = [Self::Easy, Self::Hard];

    pub const fn pair_count(self) -> PairCount {
        match self {
            Self::Easy => 6,
            Self::Hard => 12,
        }
    }

    pub const fn card_count(self) -> Position {
        self.pair_count() * 2
    }

    /// Suggested grid width for rendering.
    pub const fn columns(self) -> u8 {
        match self {
            Self::Easy => 4,
            Self::Hard => 6,
        }
    }

    /// Stable identifier used as the persistence key.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Hard => "hard",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy (6 pairs)",
            Self::Hard => "Hard (12 pairs)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|difficulty| difficulty.key() == key)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}
