//! Tracker configuration
//!
//! Values come from defaults, then an optional YAML or JSON file, then
//! `DEVTRACK_*` environment variables. See [`crate::config_loader`].

use crate::error::{Result, TrackerError};
use crate::export::{ExportConfig, ExportFormat};
use crate::observability::LoggingConfig;
use crate::timeline::Granularity;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Export pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Prefix for monetary amounts
    pub currency_symbol: String,
    /// Footer author when a payload names nobody
    pub generated_by: String,
    /// Format used when the caller does not pick one
    pub default_format: ExportFormat,
    /// Deadline for background exports, in seconds
    pub timeout_secs: u64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        let export = ExportConfig::default();
        Self {
            currency_symbol: export.currency_symbol,
            generated_by: export.generated_by,
            default_format: ExportFormat::KeyValueText,
            timeout_secs: 30,
        }
    }
}

impl ExportSettings {
    /// Renderer configuration derived from these settings
    #[must_use]
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            currency_symbol: self.currency_symbol.clone(),
            generated_by: self.generated_by.clone(),
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Timeline view settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Granularity used when the caller does not pick one
    pub default_view: Granularity,
}

/// Complete tracker configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub export: ExportSettings,
    pub timeline: TimelineSettings,
    pub logging: LoggingConfig,
}

/// Export settings that a file or the environment actually set
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOverlay {
    pub currency_symbol: Option<String>,
    pub generated_by: Option<String>,
    pub default_format: Option<ExportFormat>,
    pub timeout_secs: Option<u64>,
}

/// Timeline settings that a file or the environment actually set
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimelineOverlay {
    pub default_view: Option<Granularity>,
}

/// Logging settings that a file or the environment actually set
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingOverlay {
    pub level: Option<String>,
    pub json: Option<bool>,
    pub span_events: Option<bool>,
}

/// Partial configuration; `None` means "keep what lower layers decided"
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigOverlay {
    pub export: ExportOverlay,
    pub timeline: TimelineOverlay,
    pub logging: LoggingOverlay,
}

impl ConfigOverlay {
    /// Keys present in a YAML or JSON config file
    ///
    /// # Errors
    /// Returns `TrackerError::Io` if the file cannot be read, or
    /// `TrackerError::Configuration` if it cannot be parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_config_file(path.as_ref())
    }

    /// Keys set through `DEVTRACK_*` environment variables
    ///
    /// # Errors
    /// Returns `TrackerError::Configuration` if a variable holds an invalid value
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an explicit variable lookup
    ///
    /// # Errors
    /// Returns `TrackerError::Configuration` if a variable holds an invalid value
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut overlay = Self::default();

        overlay.export.currency_symbol = lookup("DEVTRACK_CURRENCY_SYMBOL");
        overlay.export.generated_by = lookup("DEVTRACK_GENERATED_BY");
        if let Some(format) = lookup("DEVTRACK_EXPORT_FORMAT") {
            overlay.export.default_format = Some(format.parse().map_err(|_| {
                TrackerError::configuration(format!("Invalid DEVTRACK_EXPORT_FORMAT value: {format}"))
            })?);
        }
        if let Some(timeout) = lookup("DEVTRACK_EXPORT_TIMEOUT") {
            overlay.export.timeout_secs = Some(timeout.trim().parse().map_err(|_| {
                TrackerError::configuration(format!("Invalid DEVTRACK_EXPORT_TIMEOUT value: {timeout}"))
            })?);
        }
        if let Some(view) = lookup("DEVTRACK_TIMELINE_VIEW") {
            overlay.timeline.default_view = Some(view.parse().map_err(|_| {
                TrackerError::configuration(format!("Invalid DEVTRACK_TIMELINE_VIEW value: {view}"))
            })?);
        }
        overlay.logging.level = lookup("DEVTRACK_LOG_LEVEL");
        if let Some(json) = lookup("DEVTRACK_LOG_JSON") {
            overlay.logging.json = Some(parse_bool(&json).ok_or_else(|| {
                TrackerError::configuration(format!("Invalid DEVTRACK_LOG_JSON value: {json}"))
            })?);
        }

        Ok(overlay)
    }
}

impl TrackerConfig {
    /// Load a complete configuration from a file; `.yaml`/`.yml` is read as
    /// YAML, anything else as JSON. Absent keys take their defaults.
    ///
    /// # Errors
    /// Returns `TrackerError::Io` if the file cannot be read, or
    /// `TrackerError::Configuration` if it cannot be parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read_config_file(path.as_ref())
    }

    /// Save configuration as `yaml` or `json`
    ///
    /// # Errors
    /// Returns `TrackerError::Configuration` for an unknown format or a
    /// serialization failure, or `TrackerError::Io` if the file cannot be written
    pub fn to_file<P: AsRef<Path>>(&self, path: P, format: &str) -> Result<()> {
        let content = match format {
            "yaml" | "yml" => serde_yaml::to_string(self).map_err(|e| {
                TrackerError::configuration(format!("Failed to serialize YAML: {e}"))
            })?,
            "json" => serde_json::to_string_pretty(self)?,
            _ => {
                return Err(TrackerError::configuration(format!(
                    "Unsupported config format: {format}"
                )))
            }
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Defaults with `DEVTRACK_*` environment variables applied
    ///
    /// # Errors
    /// Returns `TrackerError::Configuration` if a variable holds an invalid value
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.merge_with(&ConfigOverlay::from_env()?);
        Ok(config)
    }

    /// Overlay every key the overlay sets, including ones equal to the defaults
    pub fn merge_with(&mut self, overlay: &ConfigOverlay) {
        let export = &overlay.export;
        if let Some(symbol) = &export.currency_symbol {
            self.export.currency_symbol.clone_from(symbol);
        }
        if let Some(author) = &export.generated_by {
            self.export.generated_by.clone_from(author);
        }
        if let Some(format) = export.default_format {
            self.export.default_format = format;
        }
        if let Some(timeout) = export.timeout_secs {
            self.export.timeout_secs = timeout;
        }
        if let Some(view) = overlay.timeline.default_view {
            self.timeline.default_view = view;
        }
        let logging = &overlay.logging;
        if let Some(level) = &logging.level {
            self.logging.level.clone_from(level);
        }
        if let Some(json) = logging.json {
            self.logging.json = json;
        }
        if let Some(span_events) = logging.span_events {
            self.logging.span_events = span_events;
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns `TrackerError::Configuration` describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if self.export.currency_symbol.trim().is_empty() {
            return Err(TrackerError::configuration(
                "Currency symbol cannot be empty",
            ));
        }
        if self.export.generated_by.trim().is_empty() {
            return Err(TrackerError::configuration(
                "Generated-by default cannot be empty",
            ));
        }
        if self.export.timeout_secs == 0 {
            return Err(TrackerError::configuration(
                "Export timeout must be greater than 0",
            ));
        }
        self.logging.parsed_level()?;
        Ok(())
    }
}

fn read_config_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        TrackerError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read config file {}: {e}", path.display()),
        ))
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml" | "yml")
    );
    if is_yaml {
        serde_yaml::from_str(&content)
            .map_err(|e| TrackerError::configuration(format!("Failed to parse YAML config: {e}")))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| TrackerError::configuration(format!("Failed to parse JSON config: {e}")))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
