//! Asset notifications.
//!
//! Loaders broadcast [`AssetEvent`]s to every registered listener. Each
//! component owns one [`AssetSubscriptions`] and only receives events for
//! ids it is currently connected to: disconnecting an id drops anything
//! still queued for it.

use flume::{Receiver, Sender};
use rustc_hash::FxHashSet;

use crate::assets::{AssetId, AssetLoader, LoadStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetEvent {
    Ready(AssetId),
    Reloaded(AssetId),
    Failed { id: AssetId, hint: String },
}

impl AssetEvent {
    #[must_use]
    pub fn id(&self) -> AssetId {
        match self {
            AssetEvent::Ready(id) | AssetEvent::Reloaded(id) | AssetEvent::Failed { id, .. } => *id,
        }
    }
}

/// Per-listener connection set over a loader's event broadcast.
pub struct AssetSubscriptions {
    tx: Sender<AssetEvent>,
    rx: Receiver<AssetEvent>,
    connected: FxHashSet<AssetId>,
    registered: bool,
}

impl Default for AssetSubscriptions {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetSubscriptions {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = flume::unbounded();
        Self {
            tx,
            rx,
            connected: FxHashSet::default(),
            registered: false,
        }
    }

    /// Starts listening for `id`.
    ///
    /// Connecting to an asset the loader already holds queues a `Ready`
    /// event immediately, so a listener never misses a completed load. This
    /// happens on every call, including for an id that is already connected.
    pub fn connect<L: AssetLoader + ?Sized>(&mut self, id: AssetId, loader: &L) {
        if !id.is_valid() {
            return;
        }
        if !self.registered {
            loader.add_listener(self.tx.clone());
            self.registered = true;
        }
        self.connected.insert(id);
        if loader.status(id) == LoadStatus::Ready {
            // Both ends are owned here; the send cannot fail.
            let _ = self.tx.send(AssetEvent::Ready(id));
        }
    }

    /// Queues a Ready event for a connected id whatever the loader reports.
    pub(crate) fn queue_ready(&self, id: AssetId) {
        if self.connected.contains(&id) {
            // Both ends are owned here; the send cannot fail.
            let _ = self.tx.send(AssetEvent::Ready(id));
        }
    }

    pub fn disconnect(&mut self, id: AssetId) {
        self.connected.remove(&id);
    }

    /// Drops every connection and detaches from the loader.
    ///
    /// The queue is replaced, so the loader's next send to the old one fails
    /// and it prunes that listener. A later `connect` registers again.
    pub fn disconnect_all(&mut self) {
        self.connected.clear();
        let (tx, rx) = flume::unbounded();
        self.tx = tx;
        self.rx = rx;
        self.registered = false;
    }

    #[must_use]
    pub fn is_connected(&self, id: AssetId) -> bool {
        self.connected.contains(&id)
    }

    #[must_use]
    pub fn connected_count(&self) -> usize {
        self.connected.len()
    }

    /// Events waiting in the queue, before id filtering.
    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.rx.len()
    }

    /// Moves every queued event for a connected id into `out`, discarding the
    /// rest. Does not block.
    pub fn drain_into(&self, out: &mut Vec<AssetEvent>) {
        out.extend(self.rx.try_iter().filter(|event| self.connected.contains(&event.id())));
    }
}
