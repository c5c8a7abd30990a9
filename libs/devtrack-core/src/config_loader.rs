//! Configuration loading with defaults → file → environment precedence

use crate::config::{ConfigOverlay, TrackerConfig};
use crate::error::{Result, TrackerError};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads [`TrackerConfig`] from the first existing config file and the environment
pub struct ConfigLoader {
    base_config: TrackerConfig,
    config_paths: Vec<PathBuf>,
    load_from_env: bool,
    validate: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_config: TrackerConfig::default(),
            config_paths: Self::default_config_paths(),
            load_from_env: true,
            validate: true,
        }
    }

    #[must_use]
    pub fn with_base_config(mut self, config: TrackerConfig) -> Self {
        self.base_config = config;
        self
    }

    /// Try `path` before the default locations
    #[must_use]
    pub fn with_explicit_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_paths.insert(0, path.as_ref().to_path_buf());
        self
    }

    /// Replace the candidate file list
    #[must_use]
    pub fn with_config_paths<P: AsRef<Path>>(mut self, paths: Vec<P>) -> Self {
        self.config_paths = paths
            .into_iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect();
        self
    }

    #[must_use]
    pub const fn with_env_loading(mut self, enabled: bool) -> Self {
        self.load_from_env = enabled;
        self
    }

    #[must_use]
    pub const fn with_validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// Candidate files in lookup order
    #[must_use]
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Load the configuration
    ///
    /// Only the first existing file is read; a file that exists but cannot be
    /// parsed is an error rather than silently skipped.
    ///
    /// # Errors
    /// Returns `TrackerError::Configuration` or `TrackerError::Io` for an
    /// unreadable file, an invalid environment value, or a failed validation
    pub fn load(&self) -> Result<TrackerConfig> {
        let mut config = self.base_config.clone();

        match self.config_paths.iter().find(|path| path.is_file()) {
            Some(path) => {
                debug!(path = %path.display(), "loading configuration file");
                config.merge_with(&ConfigOverlay::from_file(path)?);
                info!(path = %path.display(), "loaded configuration file");
            }
            None => debug!("no configuration file found, using defaults"),
        }

        if self.load_from_env {
            config.merge_with(&ConfigOverlay::from_env()?);
        }

        if self.validate {
            config.validate()?;
        }
        Ok(config)
    }

    /// `./devtrack.yaml`, `./devtrack.json`, then the user config directory
    #[must_use]
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from("devtrack.yaml"),
            PathBuf::from("devtrack.yml"),
            PathBuf::from("devtrack.json"),
        ];
        if let Some(dir) = Self::user_config_dir() {
            paths.push(dir.join("config.yaml"));
            paths.push(dir.join("config.json"));
        }
        paths
    }

    /// `$HOME/.config/devtrack` (or `%USERPROFILE%\AppData\Roaming\devtrack`)
    #[must_use]
    pub fn user_config_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".config").join("devtrack"))
        } else {
            std::env::var("USERPROFILE").ok().map(|profile| {
                PathBuf::from(profile)
                    .join("AppData")
                    .join("Roaming")
                    .join("devtrack")
            })
        }
    }
}

/// Load configuration with the default loader, honouring an explicit file
///
/// # Errors
/// See [`ConfigLoader::load`]
pub fn load_config(explicit: Option<&Path>) -> Result<TrackerConfig> {
    let loader = ConfigLoader::new();
    match explicit {
        Some(path) if !path.is_file() => Err(TrackerError::configuration(format!(
            "Configuration file not found: {}",
            path.display()
        ))),
        Some(path) => loader.with_explicit_path(path).load(),
        None => loader.load(),
    }
}
