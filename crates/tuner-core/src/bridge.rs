//! Translation of user intents into playback and favorites operations.
//!
//! The bridge owns no state of its own: play/pause goes to the shared
//! [`PlayerHandle`], favorite toggles go through the reconciler with
//! whatever the session currently holds.

use crate::error::IntentError;
use crate::favorites::FavoritesReconciler;
use crate::playback::PlayerHandle;
use crate::session::ChannelSession;

#[derive(Clone)]
pub struct PlaybackIntentBridge {
    session: ChannelSession,
    player: PlayerHandle,
    reconciler: FavoritesReconciler,
}

impl PlaybackIntentBridge {
    pub fn new(
        session: ChannelSession,
        player: PlayerHandle,
        reconciler: FavoritesReconciler,
    ) -> Self {
        Self {
            session,
            player,
            reconciler,
        }
    }

    /// Flip playing/paused on the shared playback slot, keeping the track
    /// URL. Silently does nothing when no track URL has been set yet.
    pub async fn toggle_play_pause(&self) {
        self.player.toggle_playing().await;
    }

    /// Toggle favorite membership for the active channel, reading id, title
    /// and current flag from the session at call time.
    ///
    /// Rejected while metadata is still loading: the store entry needs the
    /// channel title, and recording a placeholder would corrupt the list.
    /// Returns the store-confirmed flag.
    pub async fn toggle_favorite(&self) -> Result<bool, IntentError> {
        let Some((id, title, currently)) = self.session.favorite_context().await else {
            return Err(IntentError::MetadataNotLoaded);
        };
        let confirmed = self.reconciler.toggle(&id, &title, currently).await?;
        self.session.apply_favorite(&id, confirmed).await;
        Ok(confirmed)
    }
}
