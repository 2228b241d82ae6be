use alloc::{collections::BTreeMap, format, string::String};
use serde::{Deserialize, Serialize};

use crate::*;

/// Durable best-result storage keyed by difficulty.
pub trait BestStore {
    fn get(&self, difficulty: Difficulty) -> Option<u32>;
    fn set(&mut self, difficulty: Difficulty, moves: u32);
}

impl<S: BestStore + ?Sized> BestStore for &mut S {
    fn get(&self, difficulty: Difficulty) -> Option<u32> {
        (**self).get(difficulty)
    }

    fn set(&mut self, difficulty: Difficulty, moves: u32) {
        (**self).set(difficulty, moves)
    }
}

/// In-process store, for tests and hosts without durable storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBestStore {
    records: BTreeMap<Difficulty, u32>,
}

impl MemoryBestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BestStore for MemoryBestStore {
    fn get(&self, difficulty: Difficulty) -> Option<u32> {
        self.records.get(&difficulty).copied()
    }

    fn set(&mut self, difficulty: Difficulty, moves: u32) {
        self.records.insert(difficulty, moves);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BestUpdate {
    New,
    Improved { previous: u32 },
    Kept { best: u32 },
}

impl BestUpdate {
    pub const fn is_record(self) -> bool {
        matches!(self, Self::New | Self::Improved { .. })
    }
}

/// Stores `moves` as the best for `difficulty` when strictly lower than the current one.
pub fn record_best<S: BestStore + ?Sized>(
    store: &mut S,
    difficulty: Difficulty,
    moves: u32,
) -> BestUpdate {
    let update = match store.get(difficulty) {
        None => BestUpdate::New,
        Some(previous) if moves < previous => BestUpdate::Improved { previous },
        Some(best) => BestUpdate::Kept { best },
    };

    if update.is_record() {
        log::debug!("new best for {:?}: {} moves ({:?})", difficulty, moves, update);
        store.set(difficulty, moves);
    }
    update
}

pub fn best_label(best: Option<u32>) -> String {
    match best {
        Some(moves) => format!("{} moves", moves),
        None => String::from("-"),
    }
}

/// Snapshot of the best results of every tier, for display.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BestResults {
    easy: Option<u32>,
    hard: Option<u32>,
}

impl BestResults {
    pub fn load<S: BestStore + ?Sized>(store: &S) -> Self {
        Self {
            easy: store.get(Difficulty::Easy),
            hard: store.get(Difficulty::Hard),
        }
    }

    pub const fn get(&self, difficulty: Difficulty) -> Option<u32> {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn label(&self, difficulty: Difficulty) -> String {
        best_label(self.get(difficulty))
    }
}
