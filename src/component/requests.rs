use crate::assets::AssetId;
use crate::component::SimpleMotion;
use crate::runtime::{MotionInstanceHandle, SharedEventHandler};

/// Per-channel request surface.
///
/// Every operation bounds-checks `channel` first: an out-of-range channel is a
/// silent no-op and getters return their default. Setters always update the
/// channel configuration and push the value into a live instance when there
/// is one.
pub trait MultiMotionRequests {
    fn channels_count(&self) -> usize;

    fn set_loop(&mut self, channel: usize, enable: bool);
    fn loop_motion(&self, channel: usize) -> bool;

    fn set_retarget(&mut self, channel: usize, enable: bool);
    fn set_reverse(&mut self, channel: usize, enable: bool);
    fn set_mirror(&mut self, channel: usize, enable: bool);

    /// Speeds that are not finite and positive are ignored.
    fn set_play_speed(&mut self, channel: usize, speed: f32);
    fn play_speed(&self, channel: usize) -> f32;

    /// Scrubs the current instance. A last instance that is still blending
    /// is moved by the same delta so the crossfade stays aligned.
    fn set_play_time(&mut self, channel: usize, time: f32);
    /// Normalized time of the current instance, 0 without one.
    fn play_time(&self, channel: usize) -> f32;

    /// Duration of the current instance, 0 without one.
    fn duration(&self, channel: usize) -> f32;

    /// Switches the channel to another motion, crossfading from the current
    /// instance.
    fn set_motion(&mut self, channel: usize, asset_id: AssetId);
    fn motion(&self, channel: usize) -> AssetId;

    fn set_blend_in_time(&mut self, channel: usize, time: f32);
    fn blend_in_time(&self, channel: usize) -> f32;
    fn set_blend_out_time(&mut self, channel: usize, time: f32);
    fn blend_out_time(&self, channel: usize) -> f32;

    fn play_motion(&mut self, channel: usize) -> Option<MotionInstanceHandle>;

    /// Handlers are kept by the channel and attached to every instance it
    /// plays from now on.
    fn add_event_handler(&mut self, channel: usize, handler: SharedEventHandler);
    fn remove_event_handler(&mut self, channel: usize, handler: &SharedEventHandler);
    fn remove_all_event_handlers(&mut self, channel: usize);

    /// Current instance if it is still alive in the runtime.
    fn motion_instance(&self, channel: usize) -> Option<MotionInstanceHandle>;

    /// Channel most recently told to play; target of the legacy API.
    fn last_active_channel(&self) -> usize;

    /// Legacy single-channel view routed to [`Self::last_active_channel`].
    fn simple(&mut self) -> SimpleMotion<'_, Self>
    where
        Self: Sized,
    {
        SimpleMotion::new(self)
    }
}
