use gloo::storage::{LocalStorage, Storage};
use serde::{Serialize, de::DeserializeOwned};

/// Namespaced `LocalStorage` key a type is persisted under.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + DeserializeOwned + Default> LocalOrDefault for T {
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_else(|err| {
            log::debug!("no stored {}: {:?}", T::KEY, err);
            Default::default()
        })
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("failed to save {}: {:?}", T::KEY, err);
        }
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}
