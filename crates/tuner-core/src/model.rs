//! Data model for one channel session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Opaque channel identifier ("groovesalad", "dronezone", ...).
///
/// Immutable once a session holds it: switching channels means tearing the
/// session down and opening a new one with a different id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    /// Build an id from user input. Empty or whitespace-only input is
    /// rejected — there is no such channel and every downstream URL would be
    /// malformed.
    pub fn new(id: impl Into<String>) -> Result<Self, SessionError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(SessionError::EmptyChannelId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive data for one channel. Replaced wholesale on each successful
/// fetch; absent until the first fetch resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub dj: String,
    pub large_image_url: String,
}

/// One recently-played song. The history list is most-recent-first, so the
/// head entry is the currently playing song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongEntry {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub played_at: DateTime<Utc>,
}

/// One row of the persisted favorites list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: String,
    pub title: String,
}
