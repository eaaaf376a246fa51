//! Abstract contract for the external channel data service.

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::model::{ChannelId, ChannelMetadata, FavoriteEntry, SongEntry};

/// Everything the core needs from the outside world: stream resolution,
/// channel metadata, song history, and the favorites collection. Transport
/// and payload format are the implementor's business.
#[async_trait]
pub trait ChannelDataService: Send + Sync {
    /// Map a channel id to a playable stream URL. Pure and infallible: the
    /// id is substituted into the provider's stream template.
    fn resolve_stream_url(&self, id: &ChannelId) -> String;

    async fn fetch_channel_metadata(&self, id: &ChannelId)
        -> Result<ChannelMetadata, ServiceError>;

    /// Most-recent-first song history for the channel.
    async fn fetch_song_history(&self, id: &ChannelId) -> Result<Vec<SongEntry>, ServiceError>;

    /// Whether the channel is present in the favorites store.
    async fn channel_exists(&self, id: &ChannelId) -> Result<bool, ServiceError>;

    async fn load_favorites(&self) -> Result<Vec<FavoriteEntry>, ServiceError>;

    async fn save_favorite(&self, entry: FavoriteEntry) -> Result<(), ServiceError>;

    async fn remove_favorite(&self, id: &ChannelId) -> Result<(), ServiceError>;
}
