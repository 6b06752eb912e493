use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};
use std::sync::Arc;

use crate::assets::{AssetId, LoadStatus};

/// One tracked asset: its load state and, once Ready, the shared payload.
pub struct AssetSlot<T> {
    pub id: AssetId,
    pub status: LoadStatus,
    pub data: Option<Arc<T>>,
    pub hint: Option<String>,
}

impl<T> AssetSlot<T> {
    fn loading(id: AssetId) -> Self {
        Self {
            id,
            status: LoadStatus::Loading,
            data: None,
            hint: None,
        }
    }
}

// Internal data structure, protected by a lock.
pub struct StorageInner<H: Key, T> {
    pub map: SlotMap<H, AssetSlot<T>>,
    pub lookup: FxHashMap<AssetId, H>,
}

impl<H: Key, T> Default for StorageInner<H, T> {
    fn default() -> Self {
        Self {
            map: SlotMap::default(),
            lookup: FxHashMap::default(),
        }
    }
}

impl<H: Key, T> StorageInner<H, T> {
    fn slot(&self, id: AssetId) -> Option<&AssetSlot<T>> {
        let handle = self.lookup.get(&id)?;
        self.map.get(*handle)
    }

    fn slot_mut(&mut self, id: AssetId) -> Option<&mut AssetSlot<T>> {
        let handle = self.lookup.get(&id)?;
        self.map.get_mut(*handle)
    }
}

/// Thread-safe asset table shared between the frame thread and loader tasks.
pub struct AssetStorage<H: Key, T> {
    inner: RwLock<StorageInner<H, T>>,
}

impl<H: Key, T> Default for AssetStorage<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Key, T> AssetStorage<H, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::default(),
        }
    }

    /// [Write] Marks `id` as Loading.
    ///
    /// Returns `false` when the asset is already loading or loaded, in which
    /// case no new load should be started.
    pub fn begin_load(&self, id: AssetId) -> bool {
        let mut guard = self.inner.write();
        if let Some(slot) = guard.slot_mut(id) {
            match slot.status {
                LoadStatus::Loading | LoadStatus::Ready => return false,
                LoadStatus::Unbound | LoadStatus::Error => {
                    slot.status = LoadStatus::Loading;
                    slot.hint = None;
                    return true;
                }
            }
        }
        let handle = guard.map.insert(AssetSlot::loading(id));
        guard.lookup.insert(id, handle);
        true
    }

    /// [Write] Marks `id` as Loading even if it is already Ready (reload).
    pub fn begin_reload(&self, id: AssetId) {
        let mut guard = self.inner.write();
        if let Some(slot) = guard.slot_mut(id) {
            slot.status = LoadStatus::Loading;
            slot.hint = None;
            return;
        }
        let handle = guard.map.insert(AssetSlot::loading(id));
        guard.lookup.insert(id, handle);
    }

    /// [Write] Stores a finished load.
    ///
    /// Returns `false` if the asset was released while its load was in
    /// flight; the result is then discarded.
    pub fn complete(&self, id: AssetId, result: std::result::Result<Arc<T>, String>) -> bool {
        let mut guard = self.inner.write();
        let Some(slot) = guard.slot_mut(id) else {
            return false;
        };
        match result {
            Ok(data) => {
                slot.status = LoadStatus::Ready;
                slot.data = Some(data);
                slot.hint = None;
            }
            Err(hint) => {
                slot.status = LoadStatus::Error;
                slot.data = None;
                slot.hint = Some(hint);
            }
        }
        true
    }

    /// [Write] Forgets an asset. In-flight loads for it are discarded.
    pub fn remove(&self, id: AssetId) -> Option<Arc<T>> {
        let mut guard = self.inner.write();
        let handle = guard.lookup.remove(&id)?;
        guard.map.remove(handle).and_then(|slot| slot.data)
    }

    /// [Read] Gets a loaded asset.
    pub fn get(&self, id: AssetId) -> Option<Arc<T>> {
        let guard = self.inner.read();
        guard.slot(id).and_then(|slot| slot.data.clone())
    }

    #[must_use]
    pub fn status(&self, id: AssetId) -> LoadStatus {
        let guard = self.inner.read();
        guard.slot(id).map_or(LoadStatus::Unbound, |slot| slot.status)
    }

    #[must_use]
    pub fn hint(&self, id: AssetId) -> Option<String> {
        let guard = self.inner.read();
        guard.slot(id).and_then(|slot| slot.hint.clone())
    }

    /// Gets the storage handle for an id.
    pub fn handle_of(&self, id: AssetId) -> Option<H> {
        let guard = self.inner.read();
        guard.lookup.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// [Read - Advanced] Acquires a read-lock guard for batch inspection.
    pub fn read_lock(&self) -> RwLockReadGuard<'_, StorageInner<H, T>> {
        self.inner.read()
    }
}
