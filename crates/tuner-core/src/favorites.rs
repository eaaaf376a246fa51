//! Favorite-status reconciliation.
//!
//! The local favorite flag is only ever set as a result of a confirmed store
//! mutation; the toggle never flips state optimistically. After every
//! confirmed mutation the canonical list is reloaded from the store and
//! published, so host-level favorites displays stay current.

use std::sync::Arc;

use tracing::debug;

use crate::error::ServiceError;
use crate::events::{EventBus, SessionEvent};
use crate::model::{ChannelId, FavoriteEntry};
use crate::service::ChannelDataService;

#[derive(Clone)]
pub struct FavoritesReconciler {
    service: Arc<dyn ChannelDataService>,
    events: EventBus,
}

impl FavoritesReconciler {
    pub fn new(service: Arc<dyn ChannelDataService>, events: EventBus) -> Self {
        Self { service, events }
    }

    /// Toggle favorite membership for one channel.
    ///
    /// Requests the store mutation first; only once the store confirms does
    /// this compute the new flag and reload the canonical list. Returns the
    /// confirmed flag for the session to apply. A failed store write
    /// propagates the error and the caller's flag stays untouched.
    pub async fn toggle(
        &self,
        id: &ChannelId,
        title: &str,
        currently_favorite: bool,
    ) -> Result<bool, ServiceError> {
        if currently_favorite {
            self.service.remove_favorite(id).await?;
            debug!(channel = %id, "favorite removed");
        } else {
            self.service
                .save_favorite(FavoriteEntry {
                    id: id.as_str().to_string(),
                    title: title.to_string(),
                })
                .await?;
            debug!(channel = %id, "favorite saved");
        }
        let confirmed = !currently_favorite;
        self.reload_favorites().await?;
        Ok(confirmed)
    }

    /// Fetch the full favorites collection from the store and publish it
    /// outward. Called after every confirmed toggle and from every session
    /// open.
    pub async fn reload_favorites(&self) -> Result<Vec<FavoriteEntry>, ServiceError> {
        let favorites = self.service.load_favorites().await?;
        self.events
            .emit(SessionEvent::FavoritesChanged(favorites.clone()));
        Ok(favorites)
    }
}
