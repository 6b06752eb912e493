use std::sync::Arc;

use slotmap::SlotMap;

use crate::assets::MotionData;
use crate::runtime::MotionInstanceHandle;
use crate::runtime::event::{MotionEvent, SharedEventHandler};
use crate::runtime::instance::MotionInstance;
use crate::runtime::params::{LoopCount, PlayMode, PlaybackParams};
use crate::runtime::system::MotionSystem;

/// Reference [`MotionSystem`]: a slot-map arena of [`MotionInstance`]s.
///
/// Event handlers run inside [`MotionRuntime::update`], after every instance
/// has been advanced. They must not lock the actor that owns this runtime.
#[derive(Debug, Default)]
pub struct MotionRuntime {
    instances: SlotMap<MotionInstanceHandle, MotionInstance>,
    pending: Vec<(MotionInstanceHandle, MotionEvent)>,
    expired: Vec<MotionInstanceHandle>,
    created_total: usize,
}

impl MotionRuntime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instances ever created, including removed ones.
    #[must_use]
    pub fn created_total(&self) -> usize {
        self.created_total
    }

    #[must_use]
    pub fn instance(&self, handle: MotionInstanceHandle) -> Option<&MotionInstance> {
        self.instances.get(handle)
    }

    pub fn instance_mut(&mut self, handle: MotionInstanceHandle) -> Option<&mut MotionInstance> {
        self.instances.get_mut(handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MotionInstanceHandle, &MotionInstance)> {
        self.instances.iter()
    }

    /// Advances every instance, dispatches their events and drops expired ones.
    pub fn update(&mut self, dt: f32) {
        let mut pending = std::mem::take(&mut self.pending);
        let mut expired = std::mem::take(&mut self.expired);

        for (handle, instance) in &mut self.instances {
            for event in instance.update(dt) {
                pending.push((handle, event));
            }
            if instance.is_expired() {
                expired.push(handle);
            }
        }

        for (handle, event) in pending.drain(..) {
            if let Some(instance) = self.instances.get(handle) {
                instance.handlers.dispatch(handle, event);
            }
        }

        for handle in expired.drain(..) {
            if self.instances.remove(handle).is_some() {
                log::trace!("Motion instance {handle:?} faded out and was removed");
            }
        }

        self.pending = pending;
        self.expired = expired;
    }

    fn with_instance(&mut self, handle: MotionInstanceHandle, f: impl FnOnce(&mut MotionInstance)) {
        if let Some(instance) = self.instances.get_mut(handle) {
            f(instance);
        }
    }
}

impl MotionSystem for MotionRuntime {
    fn create_instance(
        &mut self,
        data: Arc<MotionData>,
        params: &PlaybackParams,
    ) -> Option<MotionInstanceHandle> {
        let handle = self.instances.insert(MotionInstance::new(data, params));
        self.created_total += 1;
        Some(handle)
    }

    fn remove_instance(&mut self, handle: MotionInstanceHandle) -> bool {
        self.instances.remove(handle).is_some()
    }

    fn contains(&self, handle: MotionInstanceHandle) -> bool {
        self.instances.contains_key(handle)
    }

    fn set_max_loops(&mut self, handle: MotionInstanceHandle, loops: LoopCount) {
        self.with_instance(handle, |i| i.max_loops = loops);
    }

    fn set_play_mode(&mut self, handle: MotionInstanceHandle, mode: PlayMode) {
        self.with_instance(handle, |i| i.set_play_mode(mode));
    }

    fn set_retargeting(&mut self, handle: MotionInstanceHandle, retarget: bool) {
        self.with_instance(handle, |i| i.retarget = retarget);
    }

    fn set_mirror(&mut self, handle: MotionInstanceHandle, mirror: bool) {
        self.with_instance(handle, |i| i.mirror = mirror);
    }

    fn set_play_speed(&mut self, handle: MotionInstanceHandle, speed: f32) {
        self.with_instance(handle, |i| i.play_speed = speed);
    }

    fn set_current_time(&mut self, handle: MotionInstanceHandle, time: f32) {
        self.with_instance(handle, |i| i.set_current_time(time));
    }

    fn current_time(&self, handle: MotionInstanceHandle) -> Option<f32> {
        self.instances.get(handle).map(|i| i.time)
    }

    fn current_time_normalized(&self, handle: MotionInstanceHandle) -> Option<f32> {
        self.instances.get(handle).map(MotionInstance::normalized_time)
    }

    fn duration(&self, handle: MotionInstanceHandle) -> Option<f32> {
        self.instances.get(handle).map(MotionInstance::duration)
    }

    fn is_blending(&self, handle: MotionInstanceHandle) -> bool {
        self.instances
            .get(handle)
            .is_some_and(MotionInstance::is_blending)
    }

    fn stop(&mut self, handle: MotionInstanceHandle, fade: f32) {
        self.with_instance(handle, |i| i.stop(fade));
    }

    fn set_delete_on_zero_weight(&mut self, handle: MotionInstanceHandle, delete: bool) {
        self.with_instance(handle, |i| i.delete_on_zero_weight = delete);
    }

    fn add_event_handler(
        &mut self,
        handle: MotionInstanceHandle,
        handler: SharedEventHandler,
    ) -> bool {
        self.instances
            .get_mut(handle)
            .is_some_and(|i| i.add_handler(handler))
    }

    fn remove_event_handler(
        &mut self,
        handle: MotionInstanceHandle,
        handler: &SharedEventHandler,
    ) -> bool {
        self.instances
            .get_mut(handle)
            .is_some_and(|i| i.remove_handler(handler))
    }

    fn remove_all_event_handlers(&mut self, handle: MotionInstanceHandle) {
        self.with_instance(handle, MotionInstance::clear_handlers);
    }
}
