use std::sync::Arc;

use crate::assets::{AssetId, AssetLoader, LoadStatus, MotionBinding};
use crate::channel::Channel;
use crate::component::{MultiMotionComponent, MultiMotionRequests};
use crate::config::MotionConfig;
use crate::runtime::{
    LoopCount, MotionInstanceHandle, MotionSystem, PlayMode, PlaybackParams, SharedEventHandler,
};

impl<L: AssetLoader + ?Sized, M: MotionSystem> MultiMotionComponent<L, M> {
    /// Replaces the channel's asset id without crossfading or loading.
    pub fn set_motion_asset_id(&mut self, channel: usize, asset_id: AssetId) {
        if let Some(c) = self.channels.get_mut(channel) {
            c.configuration.motion = MotionBinding::new(asset_id);
        }
    }

    // ========================================================================
    // Asset notifications
    // ========================================================================

    /// Resolves every channel bound to `asset_id` and plays those with
    /// `play_on_activation`.
    pub fn on_asset_ready(&mut self, asset_id: AssetId) {
        self.deliver(asset_id, false);
    }

    /// Same as [`Self::on_asset_ready`]: bound channels pick up the fresh
    /// data and replay.
    pub fn on_asset_reloaded(&mut self, asset_id: AssetId) {
        self.deliver(asset_id, false);
    }

    /// Ready notification drained from the subscription queue. Several can
    /// be queued for one id (one per connect), so only channels still
    /// waiting on the asset play; the others just refresh their binding.
    pub(crate) fn on_queued_ready(&mut self, asset_id: AssetId) {
        self.deliver(asset_id, true);
    }

    fn deliver(&mut self, asset_id: AssetId, waiting_only: bool) {
        if !asset_id.is_valid() {
            return;
        }
        for index in 0..self.channels.count() {
            let Some(channel) = self.channels.get_mut(index) else {
                continue;
            };
            if channel.motion_id() != asset_id {
                continue;
            }
            channel.configuration.motion.refresh(&*self.loader);
            if !matches!(
                channel.binding().status(),
                LoadStatus::Ready | LoadStatus::Error
            ) {
                // Loader no longer holds it; keep waiting.
                continue;
            }
            let waiting = std::mem::take(&mut channel.awaiting_ready);
            if (waiting || !waiting_only) && channel.configuration.play_on_activation {
                self.play(index);
            }
        }
    }

    pub fn on_asset_failed(&mut self, asset_id: AssetId, hint: &str) {
        for channel in self.channels.iter_mut() {
            if channel.motion_id() == asset_id {
                log::warn!(
                    "Motion asset {asset_id} for channel {} failed to load: {hint}",
                    channel.index
                );
                channel.configuration.motion.fail(hint);
                channel.awaiting_ready = false;
            }
        }
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Starts the channel's motion with its full configuration.
    ///
    /// A current instance still alive is moved to the fading slot and
    /// stopped over the new blend-in time.
    pub(crate) fn play(&mut self, index: usize) -> Option<MotionInstanceHandle> {
        let channel = self.channels.get_mut(index)?;
        self.last_active_channel = index;

        let binding = &channel.configuration.motion;
        if binding.is_error() {
            log::error!(
                "Motion asset {} is in error state ({}).",
                binding.id(),
                binding.hint().unwrap_or_default()
            );
            return None;
        }
        let Some(data) = binding.data().cloned() else {
            log::debug!(
                "Channel {index}: motion asset {} is not ready; play skipped",
                binding.id()
            );
            return None;
        };

        let params = PlaybackParams::from(&channel.configuration);
        let created = self.actor.with_motion_system(|ms| {
            let handle = ms.create_instance(data, &params)?;
            for handler in channel.event_handlers.iter() {
                ms.add_event_handler(handle, Arc::clone(handler));
            }

            if let Some(previous) = channel.motion_instance.take()
                && ms.contains(previous)
            {
                if let Some(older) = channel.last_motion_instance.take() {
                    ms.remove_instance(older);
                }
                ms.stop(previous, params.blend_in_time);
                ms.set_delete_on_zero_weight(previous, true);
                channel.last_motion_instance = Some(previous);
            }
            Some(handle)
        });

        match created {
            Some(Some(handle)) => {
                channel.motion_instance = Some(handle);
                Some(handle)
            }
            Some(None) => {
                log::warn!("Channel {index}: motion system refused to create an instance");
                None
            }
            None => {
                log::debug!("Channel {index}: no actor or motion system; play skipped");
                None
            }
        }
    }

    /// Updates the configuration through `configure`, then applies `live` to
    /// the current instance if there is one.
    fn apply(
        &mut self,
        channel: usize,
        configure: impl FnOnce(&mut MotionConfig),
        live: impl FnOnce(&mut M, MotionInstanceHandle),
    ) {
        let Some(c) = self.channels.get_mut(channel) else {
            return;
        };
        configure(&mut c.configuration);
        if let Some(handle) = c.motion_instance {
            self.actor.with_motion_system(|ms| live(ms, handle));
        }
    }

    /// Queries the current instance of `channel`.
    fn query<R>(
        &self,
        channel: usize,
        f: impl FnOnce(&mut M, MotionInstanceHandle) -> Option<R>,
    ) -> Option<R> {
        let handle = self.channels.get(channel)?.motion_instance?;
        self.actor.with_motion_system(|ms| f(ms, handle)).flatten()
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Removes every channel's instances from the runtime and forgets the
    /// handles. Runtime removal only happens while an actor is bound.
    pub(crate) fn release_instances(&mut self) {
        for channel in self.channels.iter_mut() {
            let handles = [
                channel.motion_instance.take(),
                channel.last_motion_instance.take(),
            ];
            self.actor.with_motion_system(|ms| {
                for handle in handles.into_iter().flatten() {
                    ms.remove_instance(handle);
                }
            });
        }
    }
}

impl<L: AssetLoader + ?Sized, M: MotionSystem> MultiMotionRequests for MultiMotionComponent<L, M> {
    fn channels_count(&self) -> usize {
        self.channels.count()
    }

    fn set_loop(&mut self, channel: usize, enable: bool) {
        self.apply(
            channel,
            |cfg| cfg.looping = enable,
            |ms, h| ms.set_max_loops(h, LoopCount::from_looping(enable)),
        );
    }

    fn loop_motion(&self, channel: usize) -> bool {
        self.channels
            .get(channel)
            .is_some_and(|c| c.configuration.looping)
    }

    fn set_retarget(&mut self, channel: usize, enable: bool) {
        self.apply(
            channel,
            |cfg| cfg.retarget = enable,
            |ms, h| ms.set_retargeting(h, enable),
        );
    }

    fn set_reverse(&mut self, channel: usize, enable: bool) {
        self.apply(
            channel,
            |cfg| cfg.reverse = enable,
            |ms, h| ms.set_play_mode(h, PlayMode::from_reverse(enable)),
        );
    }

    fn set_mirror(&mut self, channel: usize, enable: bool) {
        self.apply(
            channel,
            |cfg| cfg.mirror = enable,
            |ms, h| ms.set_mirror(h, enable),
        );
    }

    fn set_play_speed(&mut self, channel: usize, speed: f32) {
        if !(speed > 0.0 && speed.is_finite()) {
            log::debug!("Channel {channel}: ignoring non-positive play speed {speed}");
            return;
        }
        self.apply(
            channel,
            |cfg| cfg.play_speed = speed,
            |ms, h| ms.set_play_speed(h, speed),
        );
    }

    fn play_speed(&self, channel: usize) -> f32 {
        self.channels
            .get(channel)
            .map_or(0.0, |c| c.configuration.play_speed)
    }

    fn set_play_time(&mut self, channel: usize, time: f32) {
        let Some(c) = self.channels.get(channel) else {
            return;
        };
        let (Some(current), last) = (c.motion_instance, c.last_motion_instance) else {
            return;
        };
        self.actor.with_motion_system(|ms| {
            let Some(previous) = ms.current_time(current) else {
                return;
            };
            let delta = time - previous;
            ms.set_current_time(current, time);

            if let Some(last) = last
                && ms.is_blending(last)
                && let Some(last_time) = ms.current_time(last)
            {
                ms.set_current_time(last, last_time + delta);
            }
        });
    }

    fn play_time(&self, channel: usize) -> f32 {
        self.query(channel, |ms, h| ms.current_time_normalized(h))
            .unwrap_or(0.0)
    }

    fn duration(&self, channel: usize) -> f32 {
        self.query(channel, |ms, h| ms.duration(h)).unwrap_or(0.0)
    }

    fn set_motion(&mut self, channel: usize, asset_id: AssetId) {
        let Some(current_id) = self.channels.get(channel).map(Channel::motion_id) else {
            return;
        };
        if current_id == asset_id {
            return;
        }

        // The subscription set is per component; keep it while another
        // channel still listens for the old id.
        let still_bound = self
            .channels
            .iter()
            .any(|o| o.index != channel && o.motion_id() == current_id);
        if !still_bound {
            self.subscriptions.disconnect(current_id);
        }

        let Some(c) = self.channels.get_mut(channel) else {
            return;
        };

        let cached = c.last_motion.take();

        if let Some(last) = c.last_motion_instance.take() {
            self.actor.with_motion_system(|ms| ms.remove_instance(last));
        }

        let previous = std::mem::take(&mut c.configuration.motion);
        if current_id.is_valid() {
            c.last_motion = Some(previous);
        }

        c.last_motion_instance = c.motion_instance.take();
        let blend_out = c.configuration.blend_out_time;
        if let Some(last) = c.last_motion_instance
            && blend_out > 0.0
        {
            self.actor.with_motion_system(|ms| {
                ms.stop(last, blend_out);
                ms.set_delete_on_zero_weight(last, true);
            });
        }

        let reused = match cached {
            Some(binding)
                if asset_id.is_valid() && binding.is_ready() && binding.id() == asset_id =>
            {
                log::debug!("Channel {channel}: reusing cached motion asset {asset_id}");
                c.configuration.motion = binding;
                true
            }
            cached => {
                if let Some(mut binding) = cached {
                    binding.release();
                }
                let mut binding = MotionBinding::new(asset_id);
                binding.request(&*self.loader);
                c.configuration.motion = binding;
                false
            }
        };

        c.awaiting_ready = asset_id.is_valid();
        if asset_id.is_valid() {
            self.subscriptions.connect(asset_id, &*self.loader);
            // The cached binding holds its own data; the loader may have
            // released the asset and would never report it ready.
            if reused && self.loader.status(asset_id) != LoadStatus::Ready {
                self.subscriptions.queue_ready(asset_id);
            }
        }
    }

    fn motion(&self, channel: usize) -> AssetId {
        self.channels
            .get(channel)
            .map(Channel::motion_id)
            .unwrap_or_default()
    }

    fn set_blend_in_time(&mut self, channel: usize, time: f32) {
        if let Some(c) = self.channels.get_mut(channel) {
            c.configuration.blend_in_time = time;
        }
    }

    fn blend_in_time(&self, channel: usize) -> f32 {
        self.channels
            .get(channel)
            .map_or(0.0, |c| c.configuration.blend_in_time)
    }

    fn set_blend_out_time(&mut self, channel: usize, time: f32) {
        if let Some(c) = self.channels.get_mut(channel) {
            c.configuration.blend_out_time = time;
        }
    }

    fn blend_out_time(&self, channel: usize) -> f32 {
        self.channels
            .get(channel)
            .map_or(0.0, |c| c.configuration.blend_out_time)
    }

    fn play_motion(&mut self, channel: usize) -> Option<MotionInstanceHandle> {
        self.play(channel)
    }

    fn add_event_handler(&mut self, channel: usize, handler: SharedEventHandler) {
        let Some(c) = self.channels.get_mut(channel) else {
            return;
        };
        if let Some(handle) = c.motion_instance {
            let attached = Arc::clone(&handler);
            self.actor
                .with_motion_system(|ms| ms.add_event_handler(handle, attached));
        }
        c.event_handlers.insert(handler);
    }

    fn remove_event_handler(&mut self, channel: usize, handler: &SharedEventHandler) {
        let Some(c) = self.channels.get_mut(channel) else {
            return;
        };
        if let Some(handle) = c.motion_instance {
            self.actor
                .with_motion_system(|ms| ms.remove_event_handler(handle, handler));
        }
        c.event_handlers.remove(handler);
    }

    fn remove_all_event_handlers(&mut self, channel: usize) {
        let Some(c) = self.channels.get_mut(channel) else {
            return;
        };
        if let Some(handle) = c.motion_instance {
            self.actor
                .with_motion_system(|ms| ms.remove_all_event_handlers(handle));
        }
        c.event_handlers.clear();
    }

    fn motion_instance(&self, channel: usize) -> Option<MotionInstanceHandle> {
        self.is_live(self.channels.get(channel)?.motion_instance)
    }

    fn last_active_channel(&self) -> usize {
        self.last_active_channel
    }
}
