//! JSON-file favorites store.
//!
//! The list lives as pretty-printed JSON under the platform data dir. A
//! missing file reads as an empty list; parent directories are created on
//! first write.

use std::path::{Path, PathBuf};

use tracing::debug;

use tuner_core::error::ServiceError;
use tuner_core::model::FavoriteEntry;

pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Vec<FavoriteEntry>, ServiceError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                ServiceError::Store(format!("parse {}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(ServiceError::Store(format!(
                "read {}: {e}",
                self.path.display()
            ))),
        }
    }

    pub async fn contains(&self, channel_id: &str) -> Result<bool, ServiceError> {
        Ok(self.load().await?.iter().any(|f| f.id == channel_id))
    }

    /// Add an entry. Saving an already-present id replaces the stored title.
    pub async fn save(&self, entry: FavoriteEntry) -> Result<(), ServiceError> {
        let mut favorites = self.load().await?;
        favorites.retain(|f| f.id != entry.id);
        favorites.push(entry);
        self.write(&favorites).await
    }

    /// Remove by id. Removing an absent id rewrites the list unchanged.
    pub async fn remove(&self, channel_id: &str) -> Result<(), ServiceError> {
        let mut favorites = self.load().await?;
        favorites.retain(|f| f.id != channel_id);
        self.write(&favorites).await
    }

    async fn write(&self, favorites: &[FavoriteEntry]) -> Result<(), ServiceError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Store(format!("mkdir {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(favorites)
            .map_err(|e| ServiceError::Store(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| ServiceError::Store(format!("write {}: {e}", self.path.display())))?;
        debug!(count = favorites.len(), "favorites written");
        Ok(())
    }
}
