#![allow(dead_code)]

//! In-memory service and wiring shared by the lifecycle tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::broadcast;
use tokio::sync::Notify;

use tuner_core::error::ServiceError;
use tuner_core::model::{ChannelId, ChannelMetadata, FavoriteEntry, SongEntry};
use tuner_core::service::ChannelDataService;
use tuner_core::{
    ChannelSession, EventBus, FavoritesReconciler, PlaybackIntentBridge, PlayerHandle,
    SessionEvent,
};

/// Records every service call and serves canned data. Channels must be
/// registered up front; a per-channel gate lets a test hold a metadata fetch
/// open to simulate a slow response.
#[derive(Default)]
pub struct MockService {
    calls: Mutex<Vec<String>>,
    channels: Mutex<HashMap<String, ChannelMetadata>>,
    songs: Mutex<HashMap<String, Vec<SongEntry>>>,
    favorites: Mutex<Vec<FavoriteEntry>>,
    metadata_gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl MockService {
    pub fn add_channel(&self, id: &str, title: &str) {
        self.channels.lock().unwrap().insert(
            id.to_string(),
            ChannelMetadata {
                id: id.to_string(),
                title: title.to_string(),
                description: format!("{title} description"),
                dj: "Rusty".to_string(),
                large_image_url: format!("https://api.example/img/{id}.jpg"),
            },
        );
    }

    pub fn set_songs(&self, id: &str, titles: &[&str]) {
        let songs = titles
            .iter()
            .enumerate()
            .map(|(i, title)| SongEntry {
                title: (*title).to_string(),
                artist: "Artist".to_string(),
                album: "Album".to_string(),
                played_at: Utc
                    .timestamp_opt(1_456_880_962 - (i as i64) * 180, 0)
                    .unwrap(),
            })
            .collect();
        self.songs.lock().unwrap().insert(id.to_string(), songs);
    }

    pub fn seed_favorite(&self, id: &str, title: &str) {
        self.favorites.lock().unwrap().push(FavoriteEntry {
            id: id.to_string(),
            title: title.to_string(),
        });
    }

    /// Hold the next metadata fetch for `id` open until the returned gate is
    /// notified.
    pub fn gate_metadata(&self, id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.metadata_gates
            .lock()
            .unwrap()
            .insert(id.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn favorites(&self) -> Vec<FavoriteEntry> {
        self.favorites.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ChannelDataService for MockService {
    fn resolve_stream_url(&self, id: &ChannelId) -> String {
        format!("https://api.example/{id}")
    }

    async fn fetch_channel_metadata(
        &self,
        id: &ChannelId,
    ) -> Result<ChannelMetadata, ServiceError> {
        self.record(format!("metadata {id}"));
        let gate = self.metadata_gates.lock().unwrap().remove(id.as_str());
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.channels
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| ServiceError::UnknownChannel(id.to_string()))
    }

    async fn fetch_song_history(&self, id: &ChannelId) -> Result<Vec<SongEntry>, ServiceError> {
        self.record(format!("songs {id}"));
        Ok(self
            .songs
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn channel_exists(&self, id: &ChannelId) -> Result<bool, ServiceError> {
        self.record(format!("exists {id}"));
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .any(|f| f.id == id.as_str()))
    }

    async fn load_favorites(&self) -> Result<Vec<FavoriteEntry>, ServiceError> {
        self.record("load_favorites".to_string());
        Ok(self.favorites.lock().unwrap().clone())
    }

    async fn save_favorite(&self, entry: FavoriteEntry) -> Result<(), ServiceError> {
        self.record(format!("save {}", entry.id));
        let mut favorites = self.favorites.lock().unwrap();
        favorites.retain(|f| f.id != entry.id);
        favorites.push(entry);
        Ok(())
    }

    async fn remove_favorite(&self, id: &ChannelId) -> Result<(), ServiceError> {
        self.record(format!("remove {id}"));
        self.favorites
            .lock()
            .unwrap()
            .retain(|f| f.id != id.as_str());
        Ok(())
    }
}

/// Fully wired core with a mock service behind it.
pub struct Rig {
    pub service: Arc<MockService>,
    pub events: EventBus,
    pub player: PlayerHandle,
    pub reconciler: FavoritesReconciler,
    pub session: ChannelSession,
    pub bridge: PlaybackIntentBridge,
}

pub fn rig() -> Rig {
    let service = Arc::new(MockService::default());
    let events = EventBus::default();
    let player = PlayerHandle::new(events.clone());
    let reconciler = FavoritesReconciler::new(service.clone(), events.clone());
    let session = ChannelSession::new(
        service.clone(),
        player.clone(),
        reconciler.clone(),
        events.clone(),
    );
    let bridge = PlaybackIntentBridge::new(session.clone(), player.clone(), reconciler.clone());
    Rig {
        service,
        events,
        player,
        reconciler,
        session,
        bridge,
    }
}

pub fn id(s: &str) -> ChannelId {
    ChannelId::new(s).unwrap()
}

/// Let fire-and-forget fetch tasks run to completion on the current-thread
/// test runtime.
pub async fn settle() {
    for _ in 0..64 {
        tokio::task::yield_now().await;
    }
}

/// Pop everything currently buffered on a subscription.
pub fn drain(rx: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut out = Vec::new();
    while let Ok(event) = rx.try_recv() {
        out.push(event);
    }
    out
}
