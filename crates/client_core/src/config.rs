use std::{fs, path::Path, time::Duration};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_SCROLL_THRESHOLD_PX: f64 = 800.0;

/// How to reach the remote catalog and how the browsing core behaves.
///
/// Injected into the HTTP client and the view at construction; nothing in the
/// core reads credentials from globals.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub image_base_url: String,
    pub search_debounce_ms: u64,
    pub scroll_threshold_px: f64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: None,
            image_base_url: DEFAULT_IMAGE_BASE_URL.into(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            scroll_threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
        }
    }
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn require_api_key(&self) -> anyhow::Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("no catalog API key configured; set TMDB_API_KEY or api_key in {DEFAULT_CONFIG_FILE}")
            })
    }

    /// Base URL without a trailing slash, after checking it parses.
    pub fn normalized_base_url(&self) -> anyhow::Result<String> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        Url::parse(trimmed)
            .with_context(|| format!("invalid catalog base url '{}'", self.base_url))?;
        Ok(trimmed.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    api_key: Option<String>,
    image_base_url: Option<String>,
    search_debounce_ms: Option<u64>,
    scroll_threshold_px: Option<f64>,
}

/// Defaults, then `catalog.toml` in the working directory, then environment.
pub fn load_config() -> anyhow::Result<CatalogConfig> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

pub fn load_config_from(path: &Path) -> anyhow::Result<CatalogConfig> {
    let mut config = CatalogConfig::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog config '{}'", path.display()))?;
        apply_file_config(&mut config, &raw)
            .with_context(|| format!("failed to parse catalog config '{}'", path.display()))?;
    }

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

fn apply_file_config(config: &mut CatalogConfig, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileConfig = toml::from_str(raw)?;

    if let Some(v) = file_cfg.base_url {
        config.base_url = v;
    }
    if let Some(v) = file_cfg.api_key {
        config.api_key = Some(v);
    }
    if let Some(v) = file_cfg.image_base_url {
        config.image_base_url = v;
    }
    if let Some(v) = file_cfg.search_debounce_ms {
        config.search_debounce_ms = v;
    }
    if let Some(v) = file_cfg.scroll_threshold_px {
        config.scroll_threshold_px = v;
    }

    Ok(())
}

fn apply_env_overrides(config: &mut CatalogConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("CATALOG_BASE_URL") {
        config.base_url = v;
    }
    if let Some(v) = lookup("APP__BASE_URL") {
        config.base_url = v;
    }

    if let Some(v) = lookup("TMDB_API_KEY") {
        config.api_key = Some(v);
    }
    if let Some(v) = lookup("APP__API_KEY") {
        config.api_key = Some(v);
    }

    if let Some(v) = lookup("APP__IMAGE_BASE_URL") {
        config.image_base_url = v;
    }

    if let Some(v) = lookup("APP__SEARCH_DEBOUNCE_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            config.search_debounce_ms = parsed;
        }
    }
    if let Some(v) = lookup("APP__SCROLL_THRESHOLD_PX") {
        if let Ok(parsed) = v.parse::<f64>() {
            config.scroll_threshold_px = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
