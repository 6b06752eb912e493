//! Motion runtime boundary.
//!
//! [`MotionSystem`] is the interface channels drive; [`MotionRuntime`] is the
//! in-crate arena implementation used by hosts without their own animation
//! runtime and by the tests.

pub mod actor;
pub mod event;
pub mod instance;
pub mod mixer;
pub mod params;
pub mod system;

use slotmap::new_key_type;

new_key_type! {
    /// Generational key of a runtime-owned motion instance.
    pub struct MotionInstanceHandle;
}

pub use actor::{ActorInstance, ActorRef};
pub use event::{HandlerSet, MotionEvent, MotionEventHandler, SharedEventHandler};
pub use instance::MotionInstance;
pub use mixer::MotionRuntime;
pub use params::{LoopCount, PlayMode, PlaybackParams};
pub use system::MotionSystem;
