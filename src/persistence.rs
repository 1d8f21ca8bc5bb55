//! Persistence Gateway
//!
//! Full-snapshot JSON persistence under one localStorage key. Loads fail
//! soft (a malformed snapshot is logged and discarded, never propagated).
//! Saves that blow the quota walk a degrade ladder: first drop images whose
//! stored size exceeds a threshold, then drop every image, and only then
//! give up, leaving the prior persisted state untouched.

use crate::error::TrackerError;
use crate::models::ItemRecord;

/// The single key everything lives under
pub const STORAGE_KEY: &str = "materialItems";

/// Stored images larger than this are dropped whole on the first ladder
/// step, never truncated
pub const IMAGE_STRIP_BYTES: usize = 50 * 1024;

/// What the save actually wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    SavedWithoutLargeImages,
    SavedWithoutImages,
}

/// Key-value store the gateway writes through
pub trait StorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError>;
    /// Must return `TrackerError::StorageQuota` when the value does not fit,
    /// leaving any previous value in place
    fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError>;
    fn remove(&mut self, key: &str) -> Result<(), TrackerError>;
}

/// Browser localStorage backend
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn new() -> Result<Self, TrackerError> {
        let window =
            web_sys::window().ok_or_else(|| TrackerError::Storage("no window".into()))?;
        let storage = window
            .local_storage()
            .map_err(|_| TrackerError::Storage("localStorage blocked".into()))?
            .ok_or_else(|| TrackerError::Storage("localStorage unavailable".into()))?;
        Ok(Self { storage })
    }
}

impl StorageBackend for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError> {
        self.storage
            .get_item(key)
            .map_err(|_| TrackerError::Storage("localStorage read failed".into()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        // setItem only fails when the quota is exhausted; the old value
        // stays in place on failure
        self.storage
            .set_item(key, value)
            .map_err(|_| TrackerError::StorageQuota)
    }

    fn remove(&mut self, key: &str) -> Result<(), TrackerError> {
        self.storage
            .remove_item(key)
            .map_err(|_| TrackerError::Storage("localStorage remove failed".into()))
    }
}

/// Serializes the item collection to the backend and back
pub struct PersistenceGateway<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> PersistenceGateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Missing key or malformed content both come back as an empty
    /// collection; parse failures never reach the caller
    pub fn load(&self) -> Vec<ItemRecord> {
        match self.backend.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(items) => items,
                Err(e) => {
                    report_warn(&format!("[PERSIST] malformed snapshot discarded: {e}"));
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                report_warn(&format!("[PERSIST] load failed: {e}"));
                Vec::new()
            }
        }
    }

    /// Write the full snapshot, degrading through the image-strip ladder on
    /// quota failure
    pub fn save(&mut self, items: &[ItemRecord]) -> Result<SaveOutcome, TrackerError> {
        if self.try_write(items)? {
            return Ok(SaveOutcome::Saved);
        }

        let slim = strip_images(items, IMAGE_STRIP_BYTES);
        if self.try_write(&slim)? {
            report_warn("[PERSIST] quota hit: dropped oversized images");
            return Ok(SaveOutcome::SavedWithoutLargeImages);
        }

        let bare = strip_images(items, 0);
        if self.try_write(&bare)? {
            report_warn("[PERSIST] quota hit: dropped all images");
            return Ok(SaveOutcome::SavedWithoutImages);
        }

        report_warn("[PERSIST] quota hit: snapshot not saved");
        Err(TrackerError::StorageQuota)
    }

    /// Ok(false) means the quota rejected the write; other storage failures
    /// propagate
    fn try_write(&mut self, items: &[ItemRecord]) -> Result<bool, TrackerError> {
        let json =
            serde_json::to_string(items).map_err(|e| TrackerError::Storage(e.to_string()))?;
        match self.backend.set(STORAGE_KEY, &json) {
            Ok(()) => Ok(true),
            Err(TrackerError::StorageQuota) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Clone of the collection with every image above `threshold` bytes removed
fn strip_images(items: &[ItemRecord], threshold: usize) -> Vec<ItemRecord> {
    let mut out = items.to_vec();
    for item in &mut out {
        if item.image.as_ref().is_some_and(|img| img.len() > threshold) {
            item.image = None;
        }
        for mat in &mut item.materials {
            if mat.image.as_ref().is_some_and(|img| img.len() > threshold) {
                mat.image = None;
            }
        }
    }
    out
}

/// One-shot save against the browser store
pub fn save_snapshot(items: &[ItemRecord]) -> Result<SaveOutcome, TrackerError> {
    let backend = LocalStorage::new()?;
    PersistenceGateway::new(backend).save(items)
}

/// One-shot load against the browser store; any failure yields a fresh
/// empty tracker
pub fn load_snapshot() -> Vec<ItemRecord> {
    match LocalStorage::new() {
        Ok(backend) => PersistenceGateway::new(backend).load(),
        Err(e) => {
            report_warn(&format!("[PERSIST] storage unavailable: {e}"));
            Vec::new()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn report_warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
fn report_warn(msg: &str) {
    eprintln!("{msg}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Element, ItemInput, ItemKind, Rarity};
    use crate::store::ProgressStore;
    use std::collections::HashMap;

    /// In-memory backend with an optional byte quota per value
    #[derive(Default)]
    struct MemoryBackend {
        map: HashMap<String, String>,
        quota: Option<usize>,
    }

    impl MemoryBackend {
        fn with_quota(quota: usize) -> Self {
            Self {
                map: HashMap::new(),
                quota: Some(quota),
            }
        }
    }

    impl StorageBackend for MemoryBackend {
        fn get(&self, key: &str) -> Result<Option<String>, TrackerError> {
            Ok(self.map.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
            if self.quota.is_some_and(|q| value.len() > q) {
                return Err(TrackerError::StorageQuota);
            }
            self.map.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), TrackerError> {
            self.map.remove(key);
            Ok(())
        }
    }

    fn sample_items() -> Vec<ItemRecord> {
        let mut store = ProgressStore::default();
        let kind = ItemKind::Character { element: Element::Anemo };
        store.create(ItemInput::new("Traveler", kind, Rarity::Five)).unwrap();
        store.create(ItemInput::new("The Catch", ItemKind::Weapon, Rarity::Four)).unwrap();
        store.items().to_vec()
    }

    fn data_url_of_len(len: usize) -> String {
        format!("data:image/png;base64,{}", "A".repeat(len))
    }

    #[test]
    fn round_trips_when_under_quota() {
        let mut gateway = PersistenceGateway::new(MemoryBackend::default());
        let items = sample_items();
        assert_eq!(gateway.save(&items).unwrap(), SaveOutcome::Saved);
        assert_eq!(gateway.load(), items);
    }

    #[test]
    fn missing_key_loads_empty() {
        let gateway = PersistenceGateway::new(MemoryBackend::default());
        assert!(gateway.load().is_empty());
    }

    #[test]
    fn malformed_snapshot_loads_empty() {
        let mut backend = MemoryBackend::default();
        backend.set(STORAGE_KEY, "{not json").unwrap();
        let gateway = PersistenceGateway::new(backend);
        assert!(gateway.load().is_empty());
    }

    #[test]
    fn quota_strips_exactly_the_oversized_image() {
        let mut items = sample_items();
        items[0].image = Some(data_url_of_len(IMAGE_STRIP_BYTES + 1));
        items[1].image = Some(data_url_of_len(16));

        // Quota admits the snapshot only once the oversized image is gone
        let slim = strip_images(&items, IMAGE_STRIP_BYTES);
        let quota = serde_json::to_string(&slim).unwrap().len();
        let mut gateway = PersistenceGateway::new(MemoryBackend::with_quota(quota));

        assert_eq!(
            gateway.save(&items).unwrap(),
            SaveOutcome::SavedWithoutLargeImages
        );
        let loaded = gateway.load();
        assert_eq!(loaded[0].image, None);
        assert_eq!(loaded[1].image, Some(data_url_of_len(16)));
        // Non-image fields intact
        assert_eq!(loaded[0].name, items[0].name);
        assert_eq!(loaded[0].materials, items[0].materials);
    }

    #[test]
    fn quota_second_step_strips_every_image() {
        let mut items = sample_items();
        items[0].image = Some(data_url_of_len(1024));
        items[1].materials[0].image = Some(data_url_of_len(1024));

        // Small images survive step one, so only the bare snapshot fits
        let bare = strip_images(&items, 0);
        let quota = serde_json::to_string(&bare).unwrap().len();
        let mut gateway = PersistenceGateway::new(MemoryBackend::with_quota(quota));

        assert_eq!(gateway.save(&items).unwrap(), SaveOutcome::SavedWithoutImages);
        let loaded = gateway.load();
        assert_eq!(loaded[0].image, None);
        assert!(loaded[1].materials.iter().all(|m| m.image.is_none()));
    }

    #[test]
    fn terminal_quota_failure_keeps_prior_snapshot() {
        let prior = sample_items();
        let mut backend = MemoryBackend::default();
        backend
            .set(STORAGE_KEY, &serde_json::to_string(&prior).unwrap())
            .unwrap();
        backend.quota = Some(8);

        let mut gateway = PersistenceGateway::new(backend);
        let mut bigger = prior.clone();
        bigger.extend(sample_items());

        assert_eq!(gateway.save(&bigger), Err(TrackerError::StorageQuota));
        // No partial or corrupt write
        assert_eq!(gateway.load(), prior);
    }
}
