use crate::assets::{AssetEvent, AssetLoader};
use crate::component::{LifecycleState, MultiMotionComponent};
use crate::runtime::{ActorRef, MotionSystem};

impl<L: AssetLoader + ?Sized, M: MotionSystem> MultiMotionComponent<L, M> {
    /// Connects every bound asset and requests its load.
    ///
    /// Instance handles left over from a previous activation are forgotten,
    /// not removed: the runtime they pointed into is gone.
    pub fn activate(&mut self) {
        if self.is_active() {
            return;
        }
        self.subscriptions.disconnect_all();

        for channel in self.channels.iter_mut() {
            channel.clear_instances();
            let id = channel.motion_id();
            channel.awaiting_ready = id.is_valid();
            if id.is_valid() {
                self.subscriptions.connect(id, &*self.loader);
                channel.configuration.motion.request(&*self.loader);
            }
        }

        self.state = LifecycleState::Active;
        log::debug!(
            "Multi-motion component activated with {} channel(s)",
            self.channels.count()
        );
    }

    /// Full teardown. Safe to call any number of times.
    pub fn deactivate(&mut self) {
        self.subscriptions.disconnect_all();
        self.release_instances();
        for channel in self.channels.iter_mut() {
            channel.release_bindings();
        }
        self.actor.clear();

        if self.state == LifecycleState::Active {
            log::debug!("Multi-motion component deactivated");
        }
        self.state = LifecycleState::Inactive;
    }

    pub fn on_actor_instance_created(&mut self, actor: ActorRef<M>) {
        if !self.is_active() {
            log::trace!("Actor instance created while inactive; ignored");
            return;
        }
        self.actor.set(actor);

        for index in 0..self.channels.count() {
            let play_on_activation = self
                .channels
                .get(index)
                .is_some_and(|c| c.configuration.play_on_activation);
            if play_on_activation {
                self.play(index);
            }
        }
    }

    /// Drops the channels' instances but keeps bindings and configuration.
    pub fn on_actor_instance_destroyed(&mut self) {
        if !self.is_active() {
            return;
        }
        self.release_instances();
        self.actor.clear();
    }

    /// Delivers queued asset notifications. Call once per frame.
    ///
    /// Notifications for ids no longer connected are dropped.
    pub fn pump_asset_events(&mut self) {
        if !self.is_active() {
            return;
        }
        let mut events = std::mem::take(&mut self.event_scratch);
        self.subscriptions.drain_into(&mut events);

        for event in events.drain(..) {
            // A handler earlier in this batch may have moved off this id.
            if !self.subscriptions.is_connected(event.id()) {
                continue;
            }
            match event {
                AssetEvent::Ready(id) => self.on_queued_ready(id),
                AssetEvent::Reloaded(id) => self.on_asset_reloaded(id),
                AssetEvent::Failed { id, hint } => self.on_asset_failed(id, &hint),
            }
        }

        self.event_scratch = events;
    }
}
