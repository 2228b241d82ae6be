use gloo::storage::{LocalStorage, Storage};
use mnemo_core::{BestStore, Difficulty};

/// Best results kept in the browser's `LocalStorage`, one key per tier.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LocalBestStore;

impl LocalBestStore {
    pub(crate) fn key(difficulty: Difficulty) -> String {
        format!("mnemo:best:{}", difficulty.key())
    }
}

impl BestStore for LocalBestStore {
    fn get(&self, difficulty: Difficulty) -> Option<u32> {
        // missing or unreadable entries mean no best yet
        LocalStorage::get(Self::key(difficulty)).ok()
    }

    fn set(&mut self, difficulty: Difficulty, moves: u32) {
        if let Err(err) = LocalStorage::set(Self::key(difficulty), moves) {
            log::error!("failed to store best for {:?}: {:?}", difficulty, err);
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use mnemo_core::{BestUpdate, record_best};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn best_round_trips_through_local_storage() {
        LocalStorage::delete(LocalBestStore::key(Difficulty::Hard));
        let mut store = LocalBestStore;

        assert_eq!(store.get(Difficulty::Hard), None);
        assert_eq!(record_best(&mut store, Difficulty::Hard, 30), BestUpdate::New);
        assert_eq!(
            record_best(&mut store, Difficulty::Hard, 31),
            BestUpdate::Kept { best: 30 }
        );
        assert_eq!(LocalBestStore.get(Difficulty::Hard), Some(30));

        LocalStorage::delete(LocalBestStore::key(Difficulty::Hard));
    }
}
