//! Motion Binding
//!
//! A channel's reference to a motion asset plus the load state of that asset.
//! Cloning a binding shares the loaded data (`Arc`), so a cloned binding keeps
//! the motion alive after the original is released.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::assets::{AssetId, AssetLoader, MotionData};

/// Load state of a binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadStatus {
    #[default]
    Unbound,
    Loading,
    Ready,
    Error,
}

/// Asset reference with its load status.
///
/// Serializes as the bare asset id; load state is runtime-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "AssetId", into = "AssetId")]
pub struct MotionBinding {
    id: AssetId,
    status: LoadStatus,
    data: Option<Arc<MotionData>>,
    hint: Option<String>,
}

impl MotionBinding {
    #[must_use]
    pub fn new(id: AssetId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> AssetId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready && self.data.is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == LoadStatus::Error
    }

    /// Loaded data, only while Ready.
    #[must_use]
    pub fn data(&self) -> Option<&Arc<MotionData>> {
        if self.status == LoadStatus::Ready {
            self.data.as_ref()
        } else {
            None
        }
    }

    /// Failure description reported by the loader, if the binding is in error.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Unbound -> Loading, issuing a load request for a valid id.
    pub fn request<L: AssetLoader + ?Sized>(&mut self, loader: &L) {
        if !self.id.is_valid() {
            return;
        }
        self.status = LoadStatus::Loading;
        self.hint = None;
        loader.request_load(self.id);
    }

    /// Pulls the current state of the asset from the loader.
    ///
    /// Called when a ready/reloaded notification lands for this id. A reload
    /// replaces the held data with the fresh payload.
    pub fn refresh<L: AssetLoader + ?Sized>(&mut self, loader: &L) {
        if let Some(data) = loader.get(self.id) {
            self.resolve(data);
        } else if loader.status(self.id) == LoadStatus::Error {
            let hint = loader.error_hint(self.id).unwrap_or_default();
            self.fail(hint);
        }
    }

    pub fn resolve(&mut self, data: Arc<MotionData>) {
        self.status = LoadStatus::Ready;
        self.data = Some(data);
        self.hint = None;
    }

    pub fn fail(&mut self, hint: impl Into<String>) {
        self.status = LoadStatus::Error;
        self.data = None;
        self.hint = Some(hint.into());
    }

    /// Drops the held data. The id is kept so a later activation can
    /// request the same asset again.
    pub fn release(&mut self) {
        self.status = LoadStatus::Unbound;
        self.data = None;
        self.hint = None;
    }
}

impl From<AssetId> for MotionBinding {
    fn from(id: AssetId) -> Self {
        Self::new(id)
    }
}

impl From<MotionBinding> for AssetId {
    fn from(binding: MotionBinding) -> Self {
        binding.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_then_release_keeps_id() {
        let id = AssetId::from_name("walk");
        let mut binding = MotionBinding::new(id);
        assert_eq!(binding.status(), LoadStatus::Unbound);

        binding.resolve(Arc::new(MotionData::new("walk", 1.0)));
        assert!(binding.is_ready());
        assert!(binding.data().is_some());

        binding.release();
        assert_eq!(binding.status(), LoadStatus::Unbound);
        assert!(binding.data().is_none());
        assert_eq!(binding.id(), id);
    }

    #[test]
    fn clone_keeps_data_alive_after_release() {
        let mut binding = MotionBinding::new(AssetId::from_name("idle"));
        let data = Arc::new(MotionData::new("idle", 2.0));
        binding.resolve(Arc::clone(&data));

        let cached = binding.clone();
        binding.release();

        assert!(cached.is_ready());
        assert_eq!(Arc::strong_count(&data), 2);
    }

    #[test]
    fn serializes_as_bare_id() {
        let id = AssetId::from_name("run");
        let mut binding = MotionBinding::new(id);
        binding.resolve(Arc::new(MotionData::new("run", 0.5)));

        let json = serde_json::to_string(&binding).unwrap();
        assert_eq!(json, serde_json::to_string(&id).unwrap());

        let back: MotionBinding = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), id);
        assert_eq!(back.status(), LoadStatus::Unbound);
    }
}
