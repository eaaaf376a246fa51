//! SomaFM-backed implementation of the `tuner-core` data-service contract:
//! the public channel directory and per-channel song history over HTTP, plus
//! a local JSON file for the favorites list.

pub mod api;
pub mod config;
pub mod favorites;
pub mod service;

pub use config::Config;
pub use favorites::FavoritesStore;
pub use service::SomaService;
