//! `ChannelDataService` backed by the SomaFM API and the local favorites
//! file.

use async_trait::async_trait;

use tuner_core::error::ServiceError;
use tuner_core::model::{ChannelId, ChannelMetadata, FavoriteEntry, SongEntry};
use tuner_core::service::ChannelDataService;

use crate::api::ApiClient;
use crate::config::Config;
use crate::favorites::FavoritesStore;

pub struct SomaService {
    api: ApiClient,
    store: FavoritesStore,
    stream_template: String,
}

impl SomaService {
    pub fn new(config: &Config) -> Self {
        Self {
            api: ApiClient::new(config.api.base_url.clone()),
            store: FavoritesStore::new(config.paths.favorites_file.clone()),
            stream_template: config.streams.url_template.clone(),
        }
    }
}

#[async_trait]
impl ChannelDataService for SomaService {
    fn resolve_stream_url(&self, id: &ChannelId) -> String {
        self.stream_template.replace("{id}", id.as_str())
    }

    async fn fetch_channel_metadata(
        &self,
        id: &ChannelId,
    ) -> Result<ChannelMetadata, ServiceError> {
        // SomaFM has no per-channel endpoint; pick the channel out of the
        // directory.
        self.api
            .channels()
            .await?
            .into_iter()
            .find(|c| c.id == id.as_str())
            .ok_or_else(|| ServiceError::UnknownChannel(id.to_string()))
    }

    async fn fetch_song_history(&self, id: &ChannelId) -> Result<Vec<SongEntry>, ServiceError> {
        self.api.song_history(id.as_str()).await
    }

    async fn channel_exists(&self, id: &ChannelId) -> Result<bool, ServiceError> {
        self.store.contains(id.as_str()).await
    }

    async fn load_favorites(&self) -> Result<Vec<FavoriteEntry>, ServiceError> {
        self.store.load().await
    }

    async fn save_favorite(&self, entry: FavoriteEntry) -> Result<(), ServiceError> {
        self.store.save(entry).await
    }

    async fn remove_favorite(&self, id: &ChannelId) -> Result<(), ServiceError> {
        self.store.remove(id.as_str()).await
    }
}
