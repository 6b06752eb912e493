use std::time::Duration;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::assets::{AssetId, MotionData};
use crate::errors::{MotionError, Result};

/// Where a [`crate::assets::MotionAssetServer`] gets motion data from.
///
/// `load` runs on a loader thread in background mode, so it may block.
pub trait MotionSource: Send + Sync + 'static {
    fn load(&self, id: AssetId) -> Result<MotionData>;
}

enum SourceEntry {
    Motion(MotionData),
    Failure(String),
}

/// In-memory motion source.
///
/// Registered motions load successfully, registered failures report their
/// hint, anything else is `AssetNotFound`. An optional latency makes loads
/// take wall-clock time, which is useful to exercise in-flight replacement.
#[derive(Default)]
pub struct MemorySource {
    entries: RwLock<FxHashMap<AssetId, SourceEntry>>,
    latency: Option<Duration>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn insert(&self, id: AssetId, data: MotionData) {
        self.entries.write().insert(id, SourceEntry::Motion(data));
    }

    /// Registers a motion under a name-derived id and returns that id.
    pub fn register(&self, name: &str, duration: f32) -> AssetId {
        let id = AssetId::from_name(name);
        self.insert(id, MotionData::new(name, duration));
        id
    }

    pub fn insert_failure(&self, id: AssetId, hint: impl Into<String>) {
        self.entries.write().insert(id, SourceEntry::Failure(hint.into()));
    }

    pub fn remove(&self, id: AssetId) {
        self.entries.write().remove(&id);
    }
}

impl MotionSource for MemorySource {
    fn load(&self, id: AssetId) -> Result<MotionData> {
        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }
        match self.entries.read().get(&id) {
            Some(SourceEntry::Motion(data)) => Ok(data.clone()),
            Some(SourceEntry::Failure(hint)) => Err(MotionError::AssetLoadFailed {
                id,
                hint: hint.clone(),
            }),
            None => Err(MotionError::AssetNotFound(id)),
        }
    }
}
