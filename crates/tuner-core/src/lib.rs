//! Core session logic for a streaming-radio channel client.
//!
//! One [`ChannelSession`] manages the lifecycle of a single active channel:
//! it resolves the stream URL, fetches metadata and recently-played songs,
//! tracks favorite status, and re-polls the song history on a fixed cadence.
//! User intents (play/pause, favorite toggle) enter through
//! [`PlaybackIntentBridge`]; everything the host needs to render flows out as
//! [`SessionEvent`]s or through the session's accessors.
//!
//! The external world is abstracted behind [`ChannelDataService`]; the
//! `tuner-somafm` crate ships the production implementation.

pub mod bridge;
pub mod error;
pub mod events;
pub mod favorites;
pub mod model;
pub mod playback;
pub mod refresh;
pub mod service;
pub mod session;

pub use bridge::PlaybackIntentBridge;
pub use error::{IntentError, ServiceError, SessionError};
pub use events::{EventBus, SessionEvent};
pub use favorites::FavoritesReconciler;
pub use model::{ChannelId, ChannelMetadata, FavoriteEntry, SongEntry};
pub use playback::{PlaybackState, PlayerHandle};
pub use service::ChannelDataService;
pub use session::ChannelSession;
