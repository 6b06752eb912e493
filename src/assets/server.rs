use flume::Sender;
use parking_lot::Mutex;
use slotmap::new_key_type;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::runtime::Runtime;

use crate::assets::events::AssetEvent;
use crate::assets::loader::AssetLoader;
use crate::assets::source::MotionSource;
use crate::assets::storage::AssetStorage;
use crate::assets::{AssetId, LoadStatus, MotionData};
use crate::errors::{MotionError, Result};

fn get_asset_runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create motion loader runtime"))
}

new_key_type! {
    pub struct MotionAssetHandle;
}

/// Where `request_load` does its work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Loads run on the shared loader runtime's blocking pool.
    #[default]
    Background,
    /// Loads run on the calling thread. The completion event is still queued
    /// and only observed at the listener's next drain.
    Inline,
}

struct ServerInner {
    source: Arc<dyn MotionSource>,
    storage: AssetStorage<MotionAssetHandle, MotionData>,
    listeners: Mutex<Vec<Sender<AssetEvent>>>,
    policy: LoadPolicy,
    requests: AtomicUsize,
}

impl ServerInner {
    fn run_load(&self, id: AssetId, reload: bool) {
        let result = self
            .source
            .load(id)
            .and_then(|data| data.validate(id).map(|()| Arc::new(data)));

        let (stored, event) = match result {
            Ok(data) => {
                log::debug!("Motion asset {id} loaded ({:.3}s)", data.duration);
                let event = if reload {
                    AssetEvent::Reloaded(id)
                } else {
                    AssetEvent::Ready(id)
                };
                (Ok(data), event)
            }
            Err(err) => {
                log::warn!("Motion asset {id} failed to load: {err}");
                let hint = err.to_string();
                (Err(hint.clone()), AssetEvent::Failed { id, hint })
            }
        };

        if !self.storage.complete(id, stored) {
            log::debug!("Motion asset {id} was released while loading; result discarded");
            return;
        }
        self.broadcast(&event);
    }

    fn broadcast(&self, event: &AssetEvent) {
        let mut listeners = self.listeners.lock();
        listeners.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

/// Reference [`AssetLoader`] backed by a [`MotionSource`].
///
/// Cheap to clone; clones share storage, listeners and the request counter.
#[derive(Clone)]
pub struct MotionAssetServer {
    inner: Arc<ServerInner>,
}

impl MotionAssetServer {
    #[must_use]
    pub fn new(source: impl MotionSource) -> Self {
        Self::with_policy(source, LoadPolicy::Background)
    }

    /// Server whose loads complete synchronously inside `request_load`.
    #[must_use]
    pub fn inline(source: impl MotionSource) -> Self {
        Self::with_policy(source, LoadPolicy::Inline)
    }

    #[must_use]
    pub fn with_policy(source: impl MotionSource, policy: LoadPolicy) -> Self {
        Self::from_shared(Arc::new(source), policy)
    }

    #[must_use]
    pub fn from_shared(source: Arc<dyn MotionSource>, policy: LoadPolicy) -> Self {
        Self {
            inner: Arc::new(ServerInner {
                source,
                storage: AssetStorage::new(),
                listeners: Mutex::new(Vec::new()),
                policy,
                requests: AtomicUsize::new(0),
            }),
        }
    }

    #[must_use]
    pub fn policy(&self) -> LoadPolicy {
        self.inner.policy
    }

    /// Number of loads actually started (deduplicated requests excluded).
    #[must_use]
    pub fn requests_issued(&self) -> usize {
        self.inner.requests.load(Ordering::Relaxed)
    }

    /// Re-runs the load for `id` and reports `Reloaded` on success.
    pub fn reload(&self, id: AssetId) {
        if !id.is_valid() {
            return;
        }
        self.inner.storage.begin_reload(id);
        self.dispatch(id, true);
    }

    /// Forgets a loaded or loading asset. Holders of its data keep their
    /// `Arc`; an in-flight load completes silently.
    pub fn release(&self, id: AssetId) -> bool {
        self.inner.storage.remove(id).is_some()
    }

    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.inner
            .storage
            .read_lock()
            .map
            .values()
            .filter(|slot| slot.status == LoadStatus::Ready)
            .count()
    }

    fn dispatch(&self, id: AssetId, reload: bool) {
        self.inner.requests.fetch_add(1, Ordering::Relaxed);
        match self.inner.policy {
            LoadPolicy::Inline => self.inner.run_load(id, reload),
            LoadPolicy::Background => {
                let inner = Arc::clone(&self.inner);
                get_asset_runtime().spawn_blocking(move || inner.run_load(id, reload));
            }
        }
    }

    /// Asynchronously loads `id` without touching storage.
    pub async fn load_async(&self, id: AssetId) -> Result<Arc<MotionData>> {
        let source = Arc::clone(&self.inner.source);
        let data = tokio::task::spawn_blocking(move || source.load(id)).await??;
        data.validate(id)?;
        Ok(Arc::new(data))
    }
}

impl AssetLoader for MotionAssetServer {
    fn request_load(&self, id: AssetId) {
        if !id.is_valid() {
            return;
        }
        if !self.inner.storage.begin_load(id) {
            log::trace!("Motion asset {id} already loading or loaded");
            return;
        }
        self.dispatch(id, false);
    }

    fn blocking_load(&self, id: AssetId) -> Result<Arc<MotionData>> {
        if !id.is_valid() {
            return Err(MotionError::AssetNotFound(id));
        }
        if let Some(data) = self.inner.storage.get(id) {
            return Ok(data);
        }
        get_asset_runtime().block_on(self.load_async(id))
    }

    fn status(&self, id: AssetId) -> LoadStatus {
        self.inner.storage.status(id)
    }

    fn get(&self, id: AssetId) -> Option<Arc<MotionData>> {
        self.inner.storage.get(id)
    }

    fn error_hint(&self, id: AssetId) -> Option<String> {
        self.inner.storage.hint(id)
    }

    fn add_listener(&self, listener: Sender<AssetEvent>) {
        self.inner.listeners.lock().push(listener);
    }
}
