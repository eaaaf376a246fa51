//! SomaFM HTTP API client.
//!
//! Two endpoints matter here: `channels.json` (the full channel directory)
//! and `songs/{id}.json` (most-recent-first play history for one channel).
//! Payload fields that SomaFM sometimes omits default to empty strings.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use tuner_core::error::ServiceError;
use tuner_core::model::{ChannelMetadata, SongEntry};

#[derive(Debug, Deserialize)]
struct ChannelListPayload {
    channels: Vec<ChannelPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelPayload {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dj: String,
    #[serde(default, rename = "largeimage")]
    pub large_image: String,
}

#[derive(Debug, Deserialize)]
struct SongListPayload {
    songs: Vec<SongPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SongPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    /// Epoch seconds, sent as a string.
    #[serde(default)]
    pub date: String,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the full channel directory.
    pub async fn channels(&self) -> Result<Vec<ChannelMetadata>, ServiceError> {
        let url = format!("{}/channels.json", self.base_url);
        let payload: ChannelListPayload = self.get_json(&url).await?;
        debug!(count = payload.channels.len(), "channel directory fetched");
        Ok(payload.channels.into_iter().map(channel_metadata).collect())
    }

    /// Most-recent-first song history for one channel.
    pub async fn song_history(&self, channel_id: &str) -> Result<Vec<SongEntry>, ServiceError> {
        let url = format!("{}/songs/{}.json", self.base_url, channel_id);
        let payload: SongListPayload = self.get_json(&url).await?;
        Ok(payload.songs.into_iter().map(song_entry).collect())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ServiceError> {
        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ServiceError::Http(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ServiceError::Http(format!(
                "{url} returned {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| ServiceError::Payload(e.to_string()))
    }
}

fn channel_metadata(c: ChannelPayload) -> ChannelMetadata {
    ChannelMetadata {
        id: c.id,
        title: c.title,
        description: c.description,
        dj: c.dj,
        large_image_url: c.large_image,
    }
}

fn song_entry(s: SongPayload) -> SongEntry {
    SongEntry {
        played_at: parse_epoch(&s.date),
        title: s.title,
        artist: s.artist,
        album: s.album,
    }
}

/// SomaFM sends played-at as epoch seconds in a string. Anything unparsable
/// collapses to the epoch rather than failing the whole history.
fn parse_epoch(raw: &str) -> DateTime<Utc> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
