//! Channel session lifecycle.
//!
//! One [`ChannelSession`] owns the in-memory state for one active channel:
//! the id, fetched metadata, song history, favorite flag, and the refresh
//! task that re-polls song history. Opening a channel fires four independent
//! fetches plus a favorites reload; none of them is ordered relative to the
//! others, and each writes its own state slot, so the lack of ordering is
//! safe by construction.
//!
//! Every spawned fetch carries the channel id it was issued for. Results are
//! applied only while that id is still the active one, so a slow fetch for a
//! previous channel can never overwrite the current channel's state.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::events::{EventBus, SessionEvent};
use crate::favorites::FavoritesReconciler;
use crate::model::{ChannelId, ChannelMetadata, SongEntry};
use crate::playback::PlayerHandle;
use crate::refresh::{FixedInterval, RefreshFactory, RefreshStrategy, REFRESH_INTERVAL};
use crate::service::ChannelDataService;

#[derive(Default)]
struct SessionState {
    /// Active channel; `None` after close. Doubles as the staleness gate for
    /// late-arriving fetch results.
    channel_id: Option<ChannelId>,
    metadata: Option<ChannelMetadata>,
    /// Most-recent-first, replaced wholesale on each refresh.
    songs: Vec<SongEntry>,
    favorite: bool,
}

/// Handle to one channel session. Cheap to clone; all clones share state.
#[derive(Clone)]
pub struct ChannelSession {
    service: Arc<dyn ChannelDataService>,
    player: PlayerHandle,
    reconciler: FavoritesReconciler,
    events: EventBus,
    state: Arc<RwLock<SessionState>>,
    /// At most one live refresh task per session. Starting a new one aborts
    /// the previous handle first, and `close()` aborts it for good.
    refresh_task: Arc<Mutex<Option<JoinHandle<()>>>>,
    refresh_factory: Arc<RefreshFactory>,
}

impl ChannelSession {
    pub fn new(
        service: Arc<dyn ChannelDataService>,
        player: PlayerHandle,
        reconciler: FavoritesReconciler,
        events: EventBus,
    ) -> Self {
        Self {
            service,
            player,
            reconciler,
            events,
            state: Arc::new(RwLock::new(SessionState::default())),
            refresh_task: Arc::new(Mutex::new(None)),
            refresh_factory: Arc::new(|| {
                Box::new(FixedInterval::new(REFRESH_INTERVAL)) as Box<dyn RefreshStrategy>
            }),
        }
    }

    /// Replace the refresh cadence (tests, or a future push-based source).
    pub fn with_refresh_factory(mut self, factory: Arc<RefreshFactory>) -> Self {
        self.refresh_factory = factory;
        self
    }

    /// Activate `id`: publish the stream URL with auto-play, fire the
    /// initial fetch burst, and (re)start the refresh loop.
    ///
    /// Returns as soon as everything is dispatched; state becomes observable
    /// as the individual fetches complete, in no guaranteed order.
    pub async fn open(&self, id: ChannelId) {
        {
            let mut state = self.state.write().await;
            state.channel_id = Some(id.clone());
            state.metadata = None;
            state.songs.clear();
            state.favorite = false;
        }
        debug!(channel = %id, "session opened");

        let url = self.service.resolve_stream_url(&id);
        self.player.set_track(url, true).await;

        self.spawn_metadata_fetch(id.clone());
        self.spawn_song_fetch(id.clone());
        self.spawn_favorite_check(id.clone());
        self.spawn_favorites_reload();
        self.start_refresh(id).await;
    }

    /// Close-then-open when the id differs; no-op on the identical id so
    /// unrelated host updates cannot cause refetch / timer-reset storms.
    pub async fn switch_to(&self, id: ChannelId) {
        let same = {
            let state = self.state.read().await;
            state.channel_id.as_ref() == Some(&id)
        };
        if same {
            debug!(channel = %id, "switch_to same channel, ignoring");
            return;
        }
        self.close().await;
        self.open(id).await;
    }

    /// Tear the session down: stop the refresh loop and clear the active id
    /// so late-arriving fetch results are discarded. Idempotent — closing
    /// twice is safe. In-flight fetches are not cancelled; the staleness
    /// guard drops whatever they resolve to.
    pub async fn close(&self) {
        if let Some(task) = self.refresh_task.lock().await.take() {
            task.abort();
        }
        let mut state = self.state.write().await;
        if state.channel_id.take().is_some() {
            state.metadata = None;
            state.songs.clear();
            state.favorite = false;
            debug!("session closed");
        }
    }

    /// Head of the most-recent-first history, i.e. the current song.
    /// `None` while the list is empty or unfetched.
    pub async fn current_song(&self) -> Option<SongEntry> {
        self.state.read().await.songs.first().cloned()
    }

    pub async fn channel_id(&self) -> Option<ChannelId> {
        self.state.read().await.channel_id.clone()
    }

    pub async fn metadata(&self) -> Option<ChannelMetadata> {
        self.state.read().await.metadata.clone()
    }

    pub async fn songs(&self) -> Vec<SongEntry> {
        self.state.read().await.songs.clone()
    }

    pub async fn is_favorite(&self) -> bool {
        self.state.read().await.favorite
    }

    /// Id, title and current flag of the loaded channel, for the favorite
    /// toggle. `None` until metadata has resolved.
    pub(crate) async fn favorite_context(&self) -> Option<(ChannelId, String, bool)> {
        let state = self.state.read().await;
        let id = state.channel_id.clone()?;
        let meta = state.metadata.as_ref()?;
        Some((id, meta.title.clone(), state.favorite))
    }

    /// Apply a store-confirmed favorite flag, unless the session has moved
    /// to a different channel in the meantime.
    pub(crate) async fn apply_favorite(&self, issued_for: &ChannelId, flag: bool) {
        let mut state = self.state.write().await;
        if state.channel_id.as_ref() == Some(issued_for) {
            state.favorite = flag;
        } else {
            debug!(channel = %issued_for, "discarding stale favorite confirmation");
        }
    }

    fn spawn_metadata_fetch(&self, id: ChannelId) {
        let this = self.clone();
        tokio::spawn(async move {
            match this.service.fetch_channel_metadata(&id).await {
                Ok(meta) => this.apply_metadata(&id, meta).await,
                Err(e) => warn!(channel = %id, error = %e, "metadata fetch failed"),
            }
        });
    }

    async fn apply_metadata(&self, issued_for: &ChannelId, meta: ChannelMetadata) {
        {
            let mut state = self.state.write().await;
            if state.channel_id.as_ref() != Some(issued_for) {
                debug!(channel = %issued_for, "discarding stale metadata");
                return;
            }
            state.metadata = Some(meta.clone());
        }
        self.events.emit(SessionEvent::MetadataChanged(meta));
    }

    fn spawn_song_fetch(&self, id: ChannelId) {
        let this = self.clone();
        tokio::spawn(async move {
            this.fetch_songs_once(&id).await;
        });
    }

    /// One song-history fetch, staleness-guarded. A failure leaves the last
    /// list in place; the refresh loop retries on its own cadence.
    async fn fetch_songs_once(&self, id: &ChannelId) {
        match self.service.fetch_song_history(id).await {
            Ok(songs) => {
                let mut state = self.state.write().await;
                if state.channel_id.as_ref() == Some(id) {
                    state.songs = songs;
                } else {
                    debug!(channel = %id, "discarding stale song history");
                }
            }
            Err(e) => warn!(channel = %id, error = %e, "song history fetch failed"),
        }
    }

    fn spawn_favorite_check(&self, id: ChannelId) {
        let this = self.clone();
        tokio::spawn(async move {
            match this.service.channel_exists(&id).await {
                Ok(flag) => this.apply_favorite(&id, flag).await,
                Err(e) => warn!(channel = %id, error = %e, "favorite lookup failed"),
            }
        });
    }

    fn spawn_favorites_reload(&self) {
        let reconciler = self.reconciler.clone();
        tokio::spawn(async move {
            if let Err(e) = reconciler.reload_favorites().await {
                warn!(error = %e, "favorites reload failed");
            }
        });
    }

    /// Start the song-history refresh loop, aborting any previous one first.
    async fn start_refresh(&self, id: ChannelId) {
        let this = self.clone();
        let mut strategy = (self.refresh_factory)();
        let task = tokio::spawn(async move {
            loop {
                strategy.wait_tick().await;
                // The loop is aborted on close/switch; the id check covers a
                // tick that raced the teardown.
                let active = {
                    let state = this.state.read().await;
                    state.channel_id.as_ref() == Some(&id)
                };
                if !active {
                    break;
                }
                this.fetch_songs_once(&id).await;
            }
        });
        if let Some(prev) = self.refresh_task.lock().await.replace(task) {
            prev.abort();
        }
    }
}
