use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Spoonacular recipe search endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/recipes/complexSearch";

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "SPOONACULAR_API_KEY";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct FinderConfig {
    /// API key for the recipe search endpoint (required, no default)
    #[serde(default)]
    pub api_key: String,
    /// Search endpoint URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; the transport default applies when unset
    #[serde(default)]
    pub timeout: Option<u64>,
    /// Thumbnail loading configuration
    #[serde(default)]
    pub images: ImageConfig,
}

/// Configuration for thumbnail loading
#[derive(Debug, Deserialize, Clone)]
pub struct ImageConfig {
    /// Maximum number of images fetched at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Edge length of the square thumbnails in pixels
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            thumbnail_size: default_thumbnail_size(),
        }
    }
}

// Defaults used by serde when a key is missing
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_concurrency() -> usize {
    4
}

fn default_thumbnail_size() -> u32 {
    150
}

impl FinderConfig {
    /// Create a configuration with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout: None,
            images: ImageConfig::default(),
        }
    }

    /// Point the client at a different search endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load configuration from `recipe-finder.toml` and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe-finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__IMAGES__CONCURRENCY
    pub fn load() -> Result<Self, ConfigError> {
        load_config(None)
    }

    /// Load configuration from an explicit file plus environment variables
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        load_config(Some(path))
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}

/// Load configuration from an optional file and environment variables
///
/// When `path` is `None` the file `recipe-finder.toml` is read if present.
/// A path given explicitly must exist.
pub fn load_config(path: Option<&Path>) -> Result<FinderConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("recipe-finder").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        // Nested keys are joined with `__`, e.g. RECIPE_FINDER__IMAGES__THUMBNAIL_SIZE
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    from_settings(settings, std::env::var(API_KEY_ENV).ok())
}

fn from_settings(settings: Config, fallback_key: Option<String>) -> Result<FinderConfig, ConfigError> {
    let mut config: FinderConfig = settings.try_deserialize()?;
    config.api_key = resolve_api_key(Some(config.api_key), fallback_key)?;
    config.images.concurrency = config.images.concurrency.max(1);
    Ok(config)
}

/// Pick the first non-blank key, configured value first
fn resolve_api_key(
    configured: Option<String>,
    fallback: Option<String>,
) -> Result<String, ConfigError> {
    configured
        .into_iter()
        .chain(fallback)
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
        .ok_or_else(|| ConfigError::NotFound("api_key".to_string()))
}
