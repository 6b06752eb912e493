//! Multi-Motion Component
//!
//! Drives N independent motion channels on one actor. The component never
//! owns motion instances: it holds generational handles into the actor's
//! motion system and routes every removal through it.
//!
//! # Threading
//!
//! A component is driven from a single thread. Asset loads complete
//! elsewhere and are only observed at [`MultiMotionComponent::pump_asset_events`].

mod legacy;
mod lifecycle;
mod playback;
mod requests;

use std::sync::Arc;

use crate::assets::{AssetEvent, AssetLoader, AssetSubscriptions};
use crate::channel::{ChannelState, ChannelStore};
use crate::config::{MotionConfig, MultiMotionConfig};
use crate::runtime::{ActorRef, MotionInstanceHandle, MotionSystem};

pub use legacy::SimpleMotion;
pub use requests::MultiMotionRequests;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LifecycleState {
    #[default]
    Inactive,
    Active,
}

/// The actor the component currently drives, if any.
pub(crate) struct ActorBinding<M> {
    actor: Option<ActorRef<M>>,
}

impl<M: MotionSystem> ActorBinding<M> {
    fn new() -> Self {
        Self { actor: None }
    }

    fn set(&mut self, actor: ActorRef<M>) {
        self.actor = Some(actor);
    }

    fn clear(&mut self) {
        self.actor = None;
    }

    fn is_bound(&self) -> bool {
        self.actor.is_some()
    }

    /// Runs `f` against the actor's motion system. `None` when there is no
    /// actor or it has no motion system.
    fn with_motion_system<R>(&self, f: impl FnOnce(&mut M) -> R) -> Option<R> {
        let actor = self.actor.as_ref()?;
        let mut guard = actor.lock();
        guard.motion_system_mut().map(f)
    }
}

pub struct MultiMotionComponent<L: AssetLoader + ?Sized, M: MotionSystem> {
    pub(crate) channels: ChannelStore,
    pub(crate) loader: Arc<L>,
    pub(crate) actor: ActorBinding<M>,
    pub(crate) subscriptions: AssetSubscriptions,
    pub(crate) last_active_channel: usize,
    pub(crate) state: LifecycleState,
    /// Reused across pumps to avoid per-frame allocation.
    pub(crate) event_scratch: Vec<AssetEvent>,
}

impl<L: AssetLoader + ?Sized, M: MotionSystem> MultiMotionComponent<L, M> {
    #[must_use]
    pub fn new(loader: Arc<L>, channels: impl IntoIterator<Item = MotionConfig>) -> Self {
        Self::with_store(loader, ChannelStore::from_configs(channels))
    }

    #[must_use]
    pub fn from_config(loader: Arc<L>, config: MultiMotionConfig) -> Self {
        Self::with_store(loader, ChannelStore::from(config))
    }

    #[must_use]
    pub fn with_store(loader: Arc<L>, channels: ChannelStore) -> Self {
        Self {
            channels,
            loader,
            actor: ActorBinding::new(),
            subscriptions: AssetSubscriptions::new(),
            last_active_channel: 0,
            state: LifecycleState::Inactive,
            event_scratch: Vec::new(),
        }
    }

    #[must_use]
    pub fn channels(&self) -> &ChannelStore {
        &self.channels
    }

    #[must_use]
    pub fn loader(&self) -> &Arc<L> {
        &self.loader
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    #[must_use]
    pub fn has_actor(&self) -> bool {
        self.actor.is_bound()
    }

    #[must_use]
    pub fn subscriptions(&self) -> &AssetSubscriptions {
        &self.subscriptions
    }

    /// Persisted channel setup.
    #[must_use]
    pub fn to_config(&self) -> MultiMotionConfig {
        self.channels.to_config()
    }

    fn is_live(&self, handle: Option<MotionInstanceHandle>) -> Option<MotionInstanceHandle> {
        let handle = handle?;
        self.actor
            .with_motion_system(|ms| ms.contains(handle))
            .unwrap_or(false)
            .then_some(handle)
    }

    /// Channel handles that still resolve to a runtime instance.
    #[must_use]
    pub fn live_instance_count(&self) -> usize {
        self.channels
            .iter()
            .flat_map(|c| [c.motion_instance, c.last_motion_instance])
            .filter(|h| self.is_live(*h).is_some())
            .count()
    }

    #[must_use]
    pub fn channel_state(&self, channel: usize) -> Option<ChannelState> {
        let c = self.channels.get(channel)?;
        Some(ChannelState {
            index: c.index,
            motion: c.motion_id(),
            status: c.binding().status(),
            current_instance: self.is_live(c.motion_instance),
            last_instance: self.is_live(c.last_motion_instance),
            cached_motion: c.last_motion.as_ref().map(crate::assets::MotionBinding::id),
            handler_count: c.event_handlers.len(),
        })
    }
}

impl<L: AssetLoader + ?Sized, M: MotionSystem> std::fmt::Debug for MultiMotionComponent<L, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiMotionComponent")
            .field("channels", &self.channels.count())
            .field("state", &self.state)
            .field("has_actor", &self.actor.is_bound())
            .field("last_active_channel", &self.last_active_channel)
            .finish_non_exhaustive()
    }
}
