//! Configuration file support for `uscode-cli` (spec.md §7 "Configuration").

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static GLOBAL_CONFIG: OnceLock<Config> = OnceLock::new();

/// Configuration for `uscode-cli`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fetcher endpoints for the HTTP-backed collaborators.
    #[serde(default)]
    pub fetchers: FetcherConfig,

    /// Local disk cache settings for [`uscode_markup::FsCache`].
    #[serde(default)]
    pub cache: CacheConfig,

    /// Default output format (text, json, table).
    #[serde(default = "default_format")]
    pub output_format: String,

    /// Path to the persisted graph/store document.
    #[serde(default = "default_state_path")]
    pub state_path: String,

    /// Titles to track. Not part of the persisted graph/store document
    /// (spec.md §6's `code_revision`/`section_snapshot` tables have no
    /// notion of "titles in scope"), so this lives in deployment config
    /// instead, read fresh by every command that needs it.
    #[serde(default = "default_titles")]
    pub titles: Vec<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetchers: FetcherConfig::default(),
            cache: CacheConfig::default(),
            output_format: default_format(),
            state_path: default_state_path(),
            titles: default_titles(),
        }
    }
}

/// Endpoints for the three external fetcher collaborators (spec.md §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Base URL serving codified-title XML by `title`/`release_tag`.
    #[serde(default = "default_codified_base_url")]
    pub codified_base_url: String,

    /// Base URL serving enacted-law text by `congress`/`law_number`.
    #[serde(default = "default_enacted_base_url")]
    pub enacted_base_url: String,

    /// URL of the release-point directory's flat JSON listing.
    #[serde(default = "default_release_point_listing_url")]
    pub release_point_listing_url: String,

    /// Maximum number of idle connections the HTTP client pool keeps open.
    #[serde(default = "default_pool_size")]
    pub connection_pool_size: usize,

    /// Path to a local JSON file listing enacted laws (spec.md §6: "this
    /// system does not specify who publishes this list"; a flat file is the
    /// CLI's deployment choice).
    #[serde(default = "default_enacted_laws_path")]
    pub enacted_laws_path: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            codified_base_url: default_codified_base_url(),
            enacted_base_url: default_enacted_base_url(),
            release_point_listing_url: default_release_point_listing_url(),
            connection_pool_size: default_pool_size(),
            enacted_laws_path: default_enacted_laws_path(),
        }
    }
}

/// Local read-through cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_dir")]
    pub directory: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: default_cache_dir(),
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

fn default_state_path() -> String {
    "uscode-state.json".to_string()
}

fn default_codified_base_url() -> String {
    "https://uscode.house.gov/download".to_string()
}

fn default_enacted_base_url() -> String {
    "https://www.govinfo.gov/content/pkg".to_string()
}

fn default_release_point_listing_url() -> String {
    "https://uscode.house.gov/download/releasepoints.json".to_string()
}

fn default_pool_size() -> usize {
    8
}

fn default_enacted_laws_path() -> String {
    "enacted-laws.json".to_string()
}

fn default_cache_dir() -> String {
    "./uscode-cache".to_string()
}

fn default_titles() -> Vec<u32> {
    vec![1]
}

impl Config {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from the default locations with environment
    /// variable overrides.
    ///
    /// Priority order:
    /// 1. Environment variables (`USCODE_*`)
    /// 2. `./uscode.toml` (project-level)
    /// 3. `~/.config/uscode/config.toml` (user-level)
    /// 4. Default config
    pub fn load() -> Self {
        let mut config = if let Ok(config) = Self::from_file(Path::new("uscode.toml")) {
            config
        } else if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("uscode").join("config.toml");
            Self::from_file(&user_config).unwrap_or_default()
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config
    }

    /// Applies `USCODE_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("USCODE_CODIFIED_BASE_URL") {
            self.fetchers.codified_base_url = url;
        }
        if let Ok(url) = std::env::var("USCODE_ENACTED_BASE_URL") {
            self.fetchers.enacted_base_url = url;
        }
        if let Ok(url) = std::env::var("USCODE_RELEASE_POINT_LISTING_URL") {
            self.fetchers.release_point_listing_url = url;
        }
        if let Ok(dir) = std::env::var("USCODE_CACHE_DIR") {
            self.cache.directory = dir;
        }
        if let Ok(format) = std::env::var("USCODE_OUTPUT_FORMAT") {
            self.output_format = format;
        }
        if let Ok(path) = std::env::var("USCODE_STATE_PATH") {
            self.state_path = path;
        }
        if let Ok(titles) = std::env::var("USCODE_TITLES") {
            self.titles = titles.split(',').filter_map(|t| t.trim().parse().ok()).collect();
        }
    }

    /// Saves configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// The user config directory, `~/.config/uscode`.
    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("uscode"))
    }

    /// The global configuration instance, loaded once and cached.
    pub fn global() -> &'static Config {
        GLOBAL_CONFIG.get_or_init(Self::load)
    }
}
