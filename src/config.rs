//! Configuration management for boxdbot.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default ceiling on pages fetched per pagination loop. A markup
/// regression that breaks empty-page detection must not turn into an
/// unbounded crawl.
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Default delay between successive requests to the source site, in
/// milliseconds. This is a rate limit the site expects, not a tunable
/// performance knob.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 700;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory (composed grids land here).
    pub data_dir: PathBuf,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Delay between requests in milliseconds.
    pub request_delay_ms: u64,
    /// Ceiling on pages per pagination loop.
    pub max_pages: u32,
    /// TMDB API key; also read from the TMDB_API_KEY environment
    /// variable.
    pub tmdb_api_key: Option<String>,
    /// Language for TMDB responses.
    pub tmdb_language: String,
}

impl Default for Settings {
    fn default() -> Self {
        // Default to ~/.local/share-style app data; falls back to home,
        // then the current directory.
        let data_dir = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("boxdbot");

        Self {
            data_dir,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/120.0 Safari/537.36"
                .to_string(),
            request_timeout: 30,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            max_pages: DEFAULT_MAX_PAGES,
            tmdb_api_key: None,
            tmdb_language: "en-US".to_string(),
        }
    }
}

impl Settings {
    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }
}

/// Configuration file structure (TOML).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Target directory for data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Delay between requests in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_delay_ms: Option<u64>,
    /// Pagination ceiling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
    /// TMDB API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_api_key: Option<String>,
    /// TMDB response language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_language: Option<String>,

    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a specific file path.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e))?;

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref target) = self.target {
            settings.data_dir = self.resolve_path(target, base_dir);
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(delay) = self.request_delay_ms {
            settings.request_delay_ms = delay;
        }
        if let Some(max_pages) = self.max_pages {
            settings.max_pages = max_pages;
        }
        if let Some(ref key) = self.tmdb_api_key {
            settings.tmdb_api_key = Some(key.clone());
        }
        if let Some(ref lang) = self.tmdb_language {
            settings.tmdb_language = lang.clone();
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path.
    pub config_path: Option<PathBuf>,
    /// Override data directory (--data-dir flag).
    pub data_dir: Option<PathBuf>,
}

/// Load settings: defaults, then config file, then environment.
pub fn load_settings_with_options(options: LoadOptions) -> Settings {
    let config = match &options.config_path {
        Some(path) => Config::load_from_path(path).unwrap_or_default(),
        None => Config::default(),
    };

    let mut settings = Settings::default();

    let base_dir = config
        .base_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    config.apply_to_settings(&mut settings, &base_dir);

    // Environment wins over the config file for the API key.
    if let Ok(key) = std::env::var("TMDB_API_KEY") {
        if !key.is_empty() {
            settings.tmdb_api_key = Some(key);
        }
    }

    if let Some(data_dir) = options.data_dir {
        settings.data_dir = data_dir;
    }

    settings
}
