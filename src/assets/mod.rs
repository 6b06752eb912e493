//! Motion assets: ids, load state, loading and notifications.

pub mod binding;
pub mod events;
pub mod id;
pub mod loader;
pub mod motion;
pub mod server;
pub mod source;
pub mod storage;

pub use binding::{LoadStatus, MotionBinding};
pub use events::{AssetEvent, AssetSubscriptions};
pub use id::AssetId;
pub use loader::AssetLoader;
pub use motion::MotionData;
pub use server::{LoadPolicy, MotionAssetHandle, MotionAssetServer};
pub use source::{MemorySource, MotionSource};
pub use storage::AssetStorage;
