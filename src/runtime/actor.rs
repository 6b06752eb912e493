use std::sync::Arc;

use parking_lot::Mutex;

use crate::runtime::system::MotionSystem;

/// A spawned skeletal actor. Its motion system may be absent while the
/// skeleton is still being set up.
#[derive(Debug)]
pub struct ActorInstance<M> {
    pub name: String,
    pub motion_system: Option<M>,
}

/// Shared handle the host hands to components.
pub type ActorRef<M> = Arc<Mutex<ActorInstance<M>>>;

impl<M: MotionSystem> ActorInstance<M> {
    #[must_use]
    pub fn new(name: impl Into<String>, motion_system: M) -> Self {
        Self {
            name: name.into(),
            motion_system: Some(motion_system),
        }
    }

    /// Actor that has no motion system (yet).
    #[must_use]
    pub fn without_motion_system(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            motion_system: None,
        }
    }

    #[must_use]
    pub fn into_shared(self) -> ActorRef<M> {
        Arc::new(Mutex::new(self))
    }

    #[must_use]
    pub fn motion_system(&self) -> Option<&M> {
        self.motion_system.as_ref()
    }

    pub fn motion_system_mut(&mut self) -> Option<&mut M> {
        self.motion_system.as_mut()
    }
}
