//! Outward notifications from the core to a host-owned state store.
//!
//! The session never calls back into host setters; it publishes
//! [`SessionEvent`]s on a broadcast channel and hosts subscribe to whichever
//! ones they care about. This keeps the core independent of any particular
//! UI state-management mechanism.

use tokio::sync::broadcast;

use crate::model::{ChannelMetadata, FavoriteEntry};

/// Notifications published by the core.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The shared playback slot changed: new track URL and/or playing flag.
    TrackChanged { url: String, playing: bool },
    /// A channel metadata fetch resolved.
    MetadataChanged(ChannelMetadata),
    /// The canonical favorites list was reloaded from the store.
    FavoritesChanged(Vec<FavoriteEntry>),
}

/// Thin wrapper around `tokio::sync::broadcast`, shared by every core
/// component that publishes outward. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event. Zero subscribers is normal, not an error.
    pub fn emit(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
