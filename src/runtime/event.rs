use std::sync::Arc;

use smallvec::SmallVec;

use crate::runtime::MotionInstanceHandle;

/// Playback milestones reported by a motion instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// First frame advanced.
    Started,
    /// Wrapped around; `count` is the number of completed loops.
    Looped { count: u32 },
    /// Reached the end of its last loop.
    Ended,
    /// Faded out completely after a stop.
    Stopped,
}

/// Listener attached to motion instances.
pub trait MotionEventHandler: Send + Sync {
    fn on_event(&self, instance: MotionInstanceHandle, event: MotionEvent);
}

pub type SharedEventHandler = Arc<dyn MotionEventHandler>;

/// Handler identity is the allocation, not the vtable.
#[inline]
#[must_use]
pub fn same_handler(a: &SharedEventHandler, b: &SharedEventHandler) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Insertion-ordered set of handlers, without duplicates.
#[derive(Clone, Default)]
pub struct HandlerSet {
    handlers: SmallVec<[SharedEventHandler; 2]>,
}

impl HandlerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the handler was already present.
    pub fn insert(&mut self, handler: SharedEventHandler) -> bool {
        if self.contains(&handler) {
            return false;
        }
        self.handlers.push(handler);
        true
    }

    pub fn remove(&mut self, handler: &SharedEventHandler) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|h| !same_handler(h, handler));
        self.handlers.len() != before
    }

    #[must_use]
    pub fn contains(&self, handler: &SharedEventHandler) -> bool {
        self.handlers.iter().any(|h| same_handler(h, handler))
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedEventHandler> {
        self.handlers.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(crate) fn dispatch(&self, instance: MotionInstanceHandle, event: MotionEvent) {
        for handler in &self.handlers {
            handler.on_event(instance, event);
        }
    }
}

impl std::fmt::Debug for HandlerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerSet")
            .field("len", &self.handlers.len())
            .finish()
    }
}
