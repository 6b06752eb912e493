use std::sync::Arc;

use flume::Sender;

use crate::assets::{AssetEvent, AssetId, LoadStatus, MotionData};
use crate::errors::Result;

/// Asset-loading capability consumed by [`crate::MultiMotionComponent`].
///
/// Loads are fire-and-forget: completion is reported as an [`AssetEvent`]
/// on every registered listener channel. Implementations may complete on any
/// thread; the component only observes events at its synchronization point.
pub trait AssetLoader {
    /// Starts loading `id` unless it is already loading or loaded.
    fn request_load(&self, id: AssetId);

    /// One-off load that blocks the calling thread until the data is
    /// available. For tooling only; never call it from the frame loop.
    fn blocking_load(&self, id: AssetId) -> Result<Arc<MotionData>>;

    fn status(&self, id: AssetId) -> LoadStatus;

    /// Loaded data for `id`, if Ready.
    fn get(&self, id: AssetId) -> Option<Arc<MotionData>>;

    /// Human-readable reason for an asset in the Error state.
    fn error_hint(&self, id: AssetId) -> Option<String>;

    /// Registers a channel that receives every ready/reloaded/failed event.
    fn add_listener(&self, listener: Sender<AssetEvent>);
}

impl<T: AssetLoader + ?Sized> AssetLoader for Arc<T> {
    fn request_load(&self, id: AssetId) {
        (**self).request_load(id);
    }

    fn blocking_load(&self, id: AssetId) -> Result<Arc<MotionData>> {
        (**self).blocking_load(id)
    }

    fn status(&self, id: AssetId) -> LoadStatus {
        (**self).status(id)
    }

    fn get(&self, id: AssetId) -> Option<Arc<MotionData>> {
        (**self).get(id)
    }

    fn error_hint(&self, id: AssetId) -> Option<String> {
        (**self).error_hint(id)
    }

    fn add_listener(&self, listener: Sender<AssetEvent>) {
        (**self).add_listener(listener);
    }
}
