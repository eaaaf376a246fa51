//! Shared playback slot.
//!
//! `PlaybackState` is owned by the host's player layer, not by any one
//! session; sessions and the intent bridge only request transitions through
//! [`PlayerHandle`]. All mutations go through the handle so every change is
//! published on the event bus.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::events::{EventBus, SessionEvent};

/// What the external player is (asked to be) doing right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    pub current_track_url: Option<String>,
    pub is_playing: bool,
}

/// Handle to the shared playback slot. Cheap to clone; all clones share the
/// same state.
#[derive(Clone)]
pub struct PlayerHandle {
    state: Arc<RwLock<PlaybackState>>,
    events: EventBus,
}

impl PlayerHandle {
    pub fn new(events: EventBus) -> Self {
        Self {
            state: Arc::new(RwLock::new(PlaybackState::default())),
            events,
        }
    }

    pub async fn snapshot(&self) -> PlaybackState {
        self.state.read().await.clone()
    }

    /// Point playback at `url` with the given playing flag.
    pub async fn set_track(&self, url: String, playing: bool) {
        {
            let mut state = self.state.write().await;
            state.current_track_url = Some(url.clone());
            state.is_playing = playing;
        }
        self.events.emit(SessionEvent::TrackChanged { url, playing });
    }

    /// Flip the playing flag, keeping the track URL. Returns `false` without
    /// touching anything when no track is set — pausing nothing is
    /// meaningless.
    pub async fn toggle_playing(&self) -> bool {
        let (url, playing) = {
            let mut state = self.state.write().await;
            let Some(url) = state.current_track_url.clone() else {
                debug!("toggle_playing ignored: no track url set");
                return false;
            };
            state.is_playing = !state.is_playing;
            (url, state.is_playing)
        };
        self.events.emit(SessionEvent::TrackChanged { url, playing });
        true
    }
}
