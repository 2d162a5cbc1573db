// Configuration module for tmdb-poster-core
// Handles the TOML configuration file and environment overrides

use serde::Deserialize;
use std::path::PathBuf;

const APP_NAME: &str = "tmdb-poster-core";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// TOML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// TMDB API configuration
    pub tmdb: TmdbSection,

    /// Artwork selection configuration
    pub artwork: ArtworkSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TmdbSection {
    /// TMDB API key (can also come from the TMDB_API_KEY env var)
    pub api_key: Option<String>,

    /// API base URL (override for testing)
    pub api_base: String,

    /// Image host base URL
    pub image_base: String,

    /// Language sent with search/details requests
    pub language: String,
}

impl Default for TmdbSection {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            language: "en-US".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtworkSection {
    /// Primary language bucket; language-neutral images fall in here too
    pub primary_language: String,

    /// Secondary language buckets (exact tag match only)
    pub extra_languages: Vec<String>,
}

impl Default for ArtworkSection {
    fn default() -> Self {
        Self {
            primary_language: "en".to_string(),
            extra_languages: vec!["hi".to_string()],
        }
    }
}

/// TMDB client configuration, injected at construction.
/// No process-wide singletons: build one of these and hand it to the client.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub api_base: String,
    pub image_base: String,
    pub language: String,
}

/// Application configuration - combines TOML file with environment overrides
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    pub artwork: ArtworkSection,
}

impl AppConfig {
    /// Load configuration from `.env`, the TOML config file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TMDB_API_KEY, TMDB_API_BASE, TMDB_IMAGE_BASE)
    /// 2. TOML config file
    /// 3. Default values
    pub fn load() -> Self {
        dotenvy::dotenv().ok();

        let config_dir = Self::find_config_dir();
        let config_file = Self::load_config_file(&config_dir);

        Self::build(config_file)
    }

    /// Find the config directory (for locating config.toml)
    fn find_config_dir() -> PathBuf {
        // Environment variable takes priority
        if let Ok(path) = std::env::var("TMDB_POSTER_CONFIG_DIR") {
            return PathBuf::from(path);
        }

        // Then XDG config dir
        if let Some(dir) = dirs::config_dir() {
            return dir.join(APP_NAME);
        }

        // Fallback to current directory
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    /// Load and parse the TOML config file
    fn load_config_file(config_dir: &std::path::Path) -> ConfigFile {
        let config_path = config_dir.join(CONFIG_FILENAME);

        if !config_path.exists() {
            tracing::debug!(
                "No config file found at {}, using defaults",
                config_path.display()
            );
            return ConfigFile::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse config file {}: {}. Using defaults.",
                        config_path.display(),
                        e
                    );
                    ConfigFile::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read config file {}: {}. Using defaults.",
                    config_path.display(),
                    e
                );
                ConfigFile::default()
            }
        }
    }

    /// Build configuration from config file with environment overrides
    fn build(config_file: ConfigFile) -> Self {
        // API key: env > config
        let api_key = std::env::var("TMDB_API_KEY")
            .ok()
            .or(config_file.tmdb.api_key)
            .unwrap_or_default();

        let api_base = std::env::var("TMDB_API_BASE")
            .ok()
            .unwrap_or(config_file.tmdb.api_base);

        let image_base = std::env::var("TMDB_IMAGE_BASE")
            .ok()
            .unwrap_or(config_file.tmdb.image_base);

        if api_key.is_empty() {
            tracing::warn!(
                "No TMDB API key configured. Set TMDB_API_KEY or add tmdb.api_key to config.toml"
            );
        }

        Self {
            tmdb: TmdbConfig {
                api_key,
                api_base,
                image_base,
                language: config_file.tmdb.language,
            },
            artwork: config_file.artwork,
        }
    }
}
