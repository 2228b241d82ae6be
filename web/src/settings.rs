use crate::utils::*;
use mnemo_core::Difficulty;
use serde::{Deserialize, Serialize};

/// User preferences that survive reloads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub difficulty: Difficulty,
}

impl StorageKey for Settings {
    const KEY: &'static str = "mnemo:settings";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_is_namespaced() {
        assert_eq!(<Settings as StorageKey>::KEY, "mnemo:settings");
    }

    #[test]
    fn default_tier_is_easy() {
        assert_eq!(Settings::default().difficulty, Difficulty::Easy);
    }
}
