#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod assets;
pub mod channel;
pub mod component;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod tools;

pub use assets::{
    AssetEvent, AssetId, AssetLoader, LoadPolicy, LoadStatus, MemorySource, MotionAssetServer,
    MotionBinding, MotionData, MotionSource,
};
pub use channel::{Channel, ChannelState, ChannelStore};
pub use component::{LifecycleState, MultiMotionComponent, MultiMotionRequests, SimpleMotion};
pub use config::{BlendMode, MotionConfig, MultiMotionConfig};
pub use errors::{MotionError, Result};
pub use runtime::{
    ActorInstance, ActorRef, LoopCount, MotionEvent, MotionEventHandler, MotionInstanceHandle,
    MotionRuntime, MotionSystem, PlayMode, PlaybackParams, SharedEventHandler,
};
