//! Channels: one independently playable motion slot each.

pub mod store;

use serde::{Deserialize, Serialize};

use crate::assets::{AssetId, LoadStatus, MotionBinding};
use crate::config::MotionConfig;
use crate::runtime::{HandlerSet, MotionInstanceHandle};

pub use store::ChannelStore;

/// A channel's configuration plus its crossfade state.
///
/// Only the index and configuration are persisted; instance handles, the
/// cached binding and handler registrations are runtime state.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Channel {
    pub(crate) index: usize,
    #[serde(default)]
    pub(crate) configuration: MotionConfig,

    /// Authoritative instance.
    #[serde(skip)]
    pub(crate) motion_instance: Option<MotionInstanceHandle>,
    /// Previous instance, possibly fading out.
    #[serde(skip)]
    pub(crate) last_motion_instance: Option<MotionInstanceHandle>,
    /// Binding replaced by the most recent `set_motion`, kept for reuse.
    #[serde(skip)]
    pub(crate) last_motion: Option<MotionBinding>,
    #[serde(skip)]
    pub(crate) event_handlers: HandlerSet,
    /// Set when the channel starts waiting on its asset; cleared by the
    /// first ready or failed notification for it.
    #[serde(skip)]
    pub(crate) awaiting_ready: bool,
}

impl Channel {
    #[must_use]
    pub fn new(index: usize, configuration: MotionConfig) -> Self {
        Self {
            index,
            configuration,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn configuration(&self) -> &MotionConfig {
        &self.configuration
    }

    #[must_use]
    pub fn binding(&self) -> &MotionBinding {
        &self.configuration.motion
    }

    #[must_use]
    pub fn motion_id(&self) -> AssetId {
        self.configuration.motion.id()
    }

    /// Current instance handle as recorded; may be stale.
    #[must_use]
    pub fn motion_instance(&self) -> Option<MotionInstanceHandle> {
        self.motion_instance
    }

    #[must_use]
    pub fn last_motion_instance(&self) -> Option<MotionInstanceHandle> {
        self.last_motion_instance
    }

    #[must_use]
    pub fn last_motion(&self) -> Option<&MotionBinding> {
        self.last_motion.as_ref()
    }

    #[must_use]
    pub fn event_handlers(&self) -> &HandlerSet {
        &self.event_handlers
    }

    /// Forgets both instance handles without touching the runtime.
    pub(crate) fn clear_instances(&mut self) {
        self.motion_instance = None;
        self.last_motion_instance = None;
    }

    #[must_use]
    pub fn is_awaiting_ready(&self) -> bool {
        self.awaiting_ready
    }

    /// Releases loaded data of the current and cached bindings.
    pub(crate) fn release_bindings(&mut self) {
        self.awaiting_ready = false;
        self.configuration.motion.release();
        if let Some(mut last) = self.last_motion.take() {
            last.release();
        }
    }
}

/// Point-in-time view of a channel, with instance handles checked against the
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelState {
    pub index: usize,
    pub motion: AssetId,
    pub status: LoadStatus,
    pub current_instance: Option<MotionInstanceHandle>,
    pub last_instance: Option<MotionInstanceHandle>,
    pub cached_motion: Option<AssetId>,
    pub handler_count: usize,
}
