use thiserror::Error;

/// Failures surfaced by the external data service / favorites store.
///
/// The session logs these at `warn` and keeps the last-known state; they are
/// never shown as hard errors to the user (a channel that never loads just
/// stays in its loading placeholder).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("http request failed: {0}")]
    Http(String),
    #[error("unknown channel: {0}")]
    UnknownChannel(String),
    #[error("malformed payload: {0}")]
    Payload(String),
    #[error("favorites store: {0}")]
    Store(String),
}

/// Session-level failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("channel id must not be empty")]
    EmptyChannelId,
}

/// Failures of user intents, see `PlaybackIntentBridge`.
#[derive(Debug, Error)]
pub enum IntentError {
    /// Favorite toggle requested before channel metadata resolved; the store
    /// entry needs the channel title, so the intent is rejected rather than
    /// recorded with a placeholder.
    #[error("channel metadata not loaded yet")]
    MetadataNotLoaded,
    #[error(transparent)]
    Service(#[from] ServiceError),
}
