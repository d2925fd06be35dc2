use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable that overrides `catalog.api_key`
pub const API_KEY_ENV: &str = "POPCORN_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub rating: RatingConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Connection settings for the OMDb-compatible movie catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatingConfig {
    /// Number of steps offered by the rating input
    #[serde(default = "default_max_rating")]
    pub max_rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Terminal title when no movie is open
    #[serde(default = "default_app_title")]
    pub app_title: String,
    /// Shorter queries are ignored without contacting the catalog
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

fn default_base_url() -> String {
    "https://www.omdbapi.com/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_rating() -> u8 {
    10
}

fn default_app_title() -> String {
    "usePopcorn".to_string()
}

fn default_min_query_len() -> usize {
    3
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            max_rating: default_max_rating(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            app_title: default_app_title(),
            min_query_len: default_min_query_len(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise defaults. Applies environment overrides.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.catalog.api_key = key.trim().to_string();
            }
        }
    }

    /// Settings that must hold for any command
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rating.max_rating == 0 || self.rating.max_rating > 20 {
            return Err(anyhow::anyhow!(
                "rating.max_rating must be between 1 and 20 (got {})",
                self.rating.max_rating
            ));
        }

        if self.ui.min_query_len == 0 {
            return Err(anyhow::anyhow!("ui.min_query_len must be at least 1"));
        }

        let base_url = self.catalog.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "catalog.base_url must be an http(s) URL (got '{}')",
                self.catalog.base_url
            ));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(anyhow::anyhow!("catalog.timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// Settings required before talking to the catalog
    pub fn validate_for_catalog(&self) -> anyhow::Result<()> {
        self.validate()?;
        if !self.is_catalog_configured() {
            return Err(anyhow::anyhow!(
                "No catalog API key configured. Run `popcorn config catalog --api-key <KEY>` or set {}",
                API_KEY_ENV
            ));
        }
        Ok(())
    }

    pub fn is_catalog_configured(&self) -> bool {
        !self.catalog.api_key.trim().is_empty()
    }
}
