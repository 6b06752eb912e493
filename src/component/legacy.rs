use crate::assets::AssetId;
use crate::component::MultiMotionRequests;
use crate::runtime::{MotionInstanceHandle, SharedEventHandler};

/// Single-channel API over a multi-channel component.
///
/// Every call targets the channel that most recently played. The view holds
/// no state of its own.
pub struct SimpleMotion<'a, R: MultiMotionRequests + ?Sized> {
    inner: &'a mut R,
}

impl<'a, R: MultiMotionRequests + ?Sized> SimpleMotion<'a, R> {
    pub fn new(inner: &'a mut R) -> Self {
        Self { inner }
    }

    #[inline]
    fn channel(&self) -> usize {
        self.inner.last_active_channel()
    }

    pub fn set_loop(&mut self, enable: bool) {
        let channel = self.channel();
        self.inner.set_loop(channel, enable);
    }

    #[must_use]
    pub fn loop_motion(&self) -> bool {
        self.inner.loop_motion(self.channel())
    }

    pub fn set_retarget(&mut self, enable: bool) {
        let channel = self.channel();
        self.inner.set_retarget(channel, enable);
    }

    pub fn set_reverse(&mut self, enable: bool) {
        let channel = self.channel();
        self.inner.set_reverse(channel, enable);
    }

    pub fn set_mirror(&mut self, enable: bool) {
        let channel = self.channel();
        self.inner.set_mirror(channel, enable);
    }

    pub fn set_play_speed(&mut self, speed: f32) {
        let channel = self.channel();
        self.inner.set_play_speed(channel, speed);
    }

    #[must_use]
    pub fn play_speed(&self) -> f32 {
        self.inner.play_speed(self.channel())
    }

    pub fn set_play_time(&mut self, time: f32) {
        let channel = self.channel();
        self.inner.set_play_time(channel, time);
    }

    #[must_use]
    pub fn play_time(&self) -> f32 {
        self.inner.play_time(self.channel())
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.inner.duration(self.channel())
    }

    pub fn set_motion(&mut self, asset_id: AssetId) {
        let channel = self.channel();
        self.inner.set_motion(channel, asset_id);
    }

    #[must_use]
    pub fn motion(&self) -> AssetId {
        self.inner.motion(self.channel())
    }

    pub fn set_blend_in_time(&mut self, time: f32) {
        let channel = self.channel();
        self.inner.set_blend_in_time(channel, time);
    }

    #[must_use]
    pub fn blend_in_time(&self) -> f32 {
        self.inner.blend_in_time(self.channel())
    }

    pub fn set_blend_out_time(&mut self, time: f32) {
        let channel = self.channel();
        self.inner.set_blend_out_time(channel, time);
    }

    #[must_use]
    pub fn blend_out_time(&self) -> f32 {
        self.inner.blend_out_time(self.channel())
    }

    pub fn play_motion(&mut self) -> Option<MotionInstanceHandle> {
        let channel = self.channel();
        self.inner.play_motion(channel)
    }

    pub fn add_event_handler(&mut self, handler: SharedEventHandler) {
        let channel = self.channel();
        self.inner.add_event_handler(channel, handler);
    }

    pub fn remove_event_handler(&mut self, handler: &SharedEventHandler) {
        let channel = self.channel();
        self.inner.remove_event_handler(channel, handler);
    }

    #[must_use]
    pub fn motion_instance(&self) -> Option<MotionInstanceHandle> {
        self.inner.motion_instance(self.channel())
    }
}
