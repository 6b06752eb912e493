//! Editor and tooling queries. These block; keep them off the frame loop.

use crate::assets::{AssetId, AssetLoader};

/// Duration assumed for a motion that cannot be loaded.
pub const FALLBACK_DURATION: f32 = 1.0;

/// Loads `id` synchronously and returns its duration in seconds, or
/// [`FALLBACK_DURATION`] when the load fails.
pub fn asset_duration<L: AssetLoader + ?Sized>(loader: &L, id: AssetId) -> f32 {
    match loader.blocking_load(id) {
        Ok(data) => data.duration,
        Err(err) => {
            log::warn!("Could not read duration of motion asset {id}: {err}");
            FALLBACK_DURATION
        }
    }
}
