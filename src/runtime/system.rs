use std::sync::Arc;

use crate::assets::MotionData;
use crate::runtime::MotionInstanceHandle;
use crate::runtime::event::SharedEventHandler;
use crate::runtime::params::{LoopCount, PlayMode, PlaybackParams};

/// Animation runtime that owns motion instances.
///
/// Handles are generational: once an instance is gone (removed explicitly or
/// self-deleted after fading to zero weight) every operation on its handle is
/// a no-op and queries return `None`/`false`.
pub trait MotionSystem: Send + 'static {
    fn create_instance(
        &mut self,
        data: Arc<MotionData>,
        params: &PlaybackParams,
    ) -> Option<MotionInstanceHandle>;

    /// Returns `false` for stale handles.
    fn remove_instance(&mut self, handle: MotionInstanceHandle) -> bool;

    fn contains(&self, handle: MotionInstanceHandle) -> bool;

    // --- live parameters ---

    fn set_max_loops(&mut self, handle: MotionInstanceHandle, loops: LoopCount);
    fn set_play_mode(&mut self, handle: MotionInstanceHandle, mode: PlayMode);
    fn set_retargeting(&mut self, handle: MotionInstanceHandle, retarget: bool);
    fn set_mirror(&mut self, handle: MotionInstanceHandle, mirror: bool);
    fn set_play_speed(&mut self, handle: MotionInstanceHandle, speed: f32);
    fn set_current_time(&mut self, handle: MotionInstanceHandle, time: f32);

    // --- queries ---

    fn current_time(&self, handle: MotionInstanceHandle) -> Option<f32>;
    fn current_time_normalized(&self, handle: MotionInstanceHandle) -> Option<f32>;
    fn duration(&self, handle: MotionInstanceHandle) -> Option<f32>;
    fn is_blending(&self, handle: MotionInstanceHandle) -> bool;

    // --- fading ---

    fn stop(&mut self, handle: MotionInstanceHandle, fade: f32);
    fn set_delete_on_zero_weight(&mut self, handle: MotionInstanceHandle, delete: bool);

    // --- events ---

    fn add_event_handler(
        &mut self,
        handle: MotionInstanceHandle,
        handler: SharedEventHandler,
    ) -> bool;
    fn remove_event_handler(
        &mut self,
        handle: MotionInstanceHandle,
        handler: &SharedEventHandler,
    ) -> bool;
    fn remove_all_event_handlers(&mut self, handle: MotionInstanceHandle);
}
