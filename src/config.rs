//! Viewer configuration
//!
//! `ViewerConfig` is always available with built-in defaults. With the `config` feature
//! it can also be read from `<config_dir>/hugeview/config.toml`; command-line flags are
//! applied on top by the binary.

use crate::file_handler::{BackwardSearch, DEFAULT_PAGE_SIZE};
use crate::highlight::SearchOptions;

/// Named color theme for the terminal host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ThemeName {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl ThemeName {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::Default),
            "monochrome" => Some(Self::Monochrome),
            "high-contrast" => Some(Self::HighContrast),
            _ => None,
        }
    }
}

/// Settings shared by the viewer core and the terminal host
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(serde::Deserialize), serde(default))]
pub struct ViewerConfig {
    /// Unit of the backward newline search window
    pub page_size: u64,
    pub backward_search: BackwardSearch,
    /// Lines moved per mouse wheel tick
    pub mouse_scroll_lines: usize,
    pub search: SearchOptions,
    pub theme: ThemeName,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            backward_search: BackwardSearch::default(),
            mouse_scroll_lines: 1,
            search: SearchOptions::default(),
            theme: ThemeName::default(),
        }
    }
}

#[cfg(feature = "config")]
mod file {
    use super::ViewerConfig;
    use crate::error::{HugeviewError, Result};
    use std::path::{Path, PathBuf};

    /// Location of the configuration file, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hugeview").join("config.toml"))
    }

    impl ViewerConfig {
        /// Load the user's configuration, falling back to defaults when no file exists
        ///
        /// # Errors
        /// * `ConfigError` when the file exists but cannot be read or parsed
        pub fn load() -> Result<Self> {
            match config_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                Some(path) => {
                    log::debug!("no config file at {}", path.display());
                    Ok(Self::default())
                }
                None => {
                    log::debug!("cannot determine config directory");
                    Ok(Self::default())
                }
            }
        }

        /// Parse the configuration file at `path`
        pub fn load_from(path: &Path) -> Result<Self> {
            let data = std::fs::read_to_string(path).map_err(|e| {
                HugeviewError::config(format!("failed to read {}: {}", path.display(), e))
            })?;
            let config: Self = toml::from_str(&data).map_err(|e| {
                HugeviewError::config(format!("failed to parse {}: {}", path.display(), e))
            })?;
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        }
    }
}

#[cfg(feature = "config")]
pub use file::config_path;

impl ViewerConfig {
    /// Configuration used when the `config` feature is disabled
    #[cfg(not(feature = "config"))]
    pub fn load() -> crate::error::Result<Self> {
        Ok(Self::default())
    }
}
