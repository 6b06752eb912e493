//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;

use multi_motion::assets::{LoadPolicy, MemorySource, MotionAssetServer};
use multi_motion::{
    ActorInstance, ActorRef, MotionConfig, MotionEvent, MotionEventHandler, MotionInstanceHandle,
    MotionRuntime, MultiMotionComponent, SharedEventHandler,
};

pub type Component = MultiMotionComponent<MotionAssetServer, MotionRuntime>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Source plus an inline server over it; loads complete inside `request_load`.
pub fn inline_server() -> (Arc<MemorySource>, Arc<MotionAssetServer>) {
    let source = Arc::new(MemorySource::new());
    let server = MotionAssetServer::from_shared(source.clone(), LoadPolicy::Inline);
    (source, Arc::new(server))
}

pub fn component(server: &Arc<MotionAssetServer>, channels: Vec<MotionConfig>) -> Component {
    MultiMotionComponent::new(Arc::clone(server), channels)
}

pub fn actor() -> ActorRef<MotionRuntime> {
    ActorInstance::new("hero", MotionRuntime::new()).into_shared()
}

pub fn live_instances(actor: &ActorRef<MotionRuntime>) -> usize {
    actor.lock().motion_system().map_or(0, MotionRuntime::len)
}

pub fn created_instances(actor: &ActorRef<MotionRuntime>) -> usize {
    actor
        .lock()
        .motion_system()
        .map_or(0, MotionRuntime::created_total)
}

/// Advances the actor's runtime.
pub fn tick(actor: &ActorRef<MotionRuntime>, dt: f32) {
    if let Some(runtime) = actor.lock().motion_system_mut() {
        runtime.update(dt);
    }
}

/// Handler that records everything it sees.
#[derive(Default)]
pub struct Recorder {
    pub events: Mutex<Vec<(MotionInstanceHandle, MotionEvent)>>,
}

impl Recorder {
    pub fn shared() -> (Arc<Recorder>, SharedEventHandler) {
        let recorder = Arc::new(Recorder::default());
        let handler: SharedEventHandler = recorder.clone();
        (recorder, handler)
    }

    pub fn seen(&self) -> Vec<(MotionInstanceHandle, MotionEvent)> {
        self.events.lock().clone()
    }

    pub fn count(&self, event: MotionEvent) -> usize {
        self.events.lock().iter().filter(|(_, e)| *e == event).count()
    }
}

impl MotionEventHandler for Recorder {
    fn on_event(&self, instance: MotionInstanceHandle, event: MotionEvent) {
        self.events.lock().push((instance, event));
    }
}
