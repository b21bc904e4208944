use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub router: RouterConfig,
    pub debug: DebugConfig,
    pub keymap: KeymapConfig,
}

/// What the router renders for a path with no registered producer.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UnmatchedPolicy {
    /// Render the `/` producer.
    #[default]
    Root,
    /// Render the registered not-found page.
    NotFound,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterConfig {
    pub mount_selector: String,
    pub link_marker: String,
    pub unmatched: UnmatchedPolicy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            mount_selector: "#app".to_string(),
            link_marker: "data-link".to_string(),
            unmatched: UnmatchedPolicy::Root,
        }
    }
}

impl RouterConfig {
    /// Selector matching anchors that opt into client-side navigation.
    pub fn link_selector(&self) -> String {
        format!("a[{}]", self.link_marker)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_filter: "spanav=info".to_string(),
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::config(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::config(format!("failed to parse config {}: {source}", path.display()))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let defaults = RouterConfig::default();

        let selector = self.router.mount_selector.trim();
        self.router.mount_selector = if selector.is_empty() {
            defaults.mount_selector
        } else {
            selector.to_string()
        };

        let marker = self
            .router
            .link_marker
            .trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim();
        self.router.link_marker = if marker.is_empty() || marker.contains(char::is_whitespace) {
            defaults.link_marker
        } else {
            marker.to_string()
        };

        if self.debug.log_filter.trim().is_empty() {
            self.debug.log_filter = DebugConfig::default().log_filter;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("SPANAV_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("spanav").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("spanav")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("spanav").join("config.toml"));
    }
    None
}
