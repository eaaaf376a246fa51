use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub streams: StreamsConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamsConfig {
    /// Stream URL template; `{id}` is replaced with the channel id.
    #[serde(default = "default_url_template")]
    pub url_template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Favorites list location. Defaults to `favorites.json` under the
    /// platform data dir.
    #[serde(default = "default_favorites_file")]
    pub favorites_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Song-history poll period in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for StreamsConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            favorites_file: default_favorites_file(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            streams: StreamsConfig::default(),
            paths: PathsConfig::default(),
            refresh: RefreshConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://somafm.com".to_string()
}

fn default_url_template() -> String {
    "https://ice.somafm.com/{id}".to_string()
}

fn default_favorites_file() -> PathBuf {
    data_dir().join("favorites.json")
}

fn default_interval_ms() -> u64 {
    15_000
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tuner")
}

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tuner")
}

impl Config {
    /// Load the config, writing the defaults out on first run.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh.interval_ms)
    }
}
