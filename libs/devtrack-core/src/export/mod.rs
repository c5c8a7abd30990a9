//! Report export pipeline
//!
//! A [`ReportPayload`] is laid out once as a [`ReportDocument`] and then
//! written in one of three formats. All formats share section order, date
//! rendering and placeholders.

pub mod background;
pub mod document;
pub mod key_value;
pub mod sink;
pub mod structured;
pub mod tabular;

pub use background::export_in_background;
pub use document::{build_document, Block, Field, ReportDocument, Section, Table};
pub use sink::{ArtifactSink, MemorySink};

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, TrackerError};
use crate::models::ReportPayload;
use devtrack_common::{export_filename, DEFAULT_CURRENCY_SYMBOL, DEFAULT_GENERATED_BY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Export format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Hierarchical XML document with tables
    StructuredDocument,
    /// CSV with one header row per section
    TabularText,
    /// Markdown-flavoured `Label: value` text
    KeyValueText,
}

impl std::str::FromStr for ExportFormat {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "docx" | "document" | "xml" => Ok(Self::StructuredDocument),
            "csv" => Ok(Self::TabularText),
            "md" | "markdown" | "text" | "txt" => Ok(Self::KeyValueText),
            _ => Err(TrackerError::unsupported_format(s)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StructuredDocument => "document",
            Self::TabularText => "csv",
            Self::KeyValueText => "markdown",
        };
        write!(f, "{name}")
    }
}

impl ExportFormat {
    /// File extension without the leading dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::StructuredDocument => "xml",
            Self::TabularText => "csv",
            Self::KeyValueText => "md",
        }
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::StructuredDocument => "application/xml",
            Self::TabularText => "text/csv",
            Self::KeyValueText => "text/markdown",
        }
    }

    /// Whether filenames carry the export date
    #[must_use]
    pub const fn dated_filename(self) -> bool {
        matches!(self, Self::TabularText)
    }
}

/// Rendered bytes plus the metadata needed to save them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: &'static str,
    pub format: ExportFormat,
}

impl ExportArtifact {
    /// Content as UTF-8 text; every format produces valid UTF-8
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Prefix for monetary amounts
    pub currency_symbol: String,
    /// Footer author when the payload names nobody
    pub generated_by: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            generated_by: DEFAULT_GENERATED_BY.to_string(),
        }
    }
}

/// Renders report payloads into export artifacts
#[derive(Clone)]
pub struct ReportRenderer {
    config: ExportConfig,
    clock: Arc<dyn Clock>,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(ExportConfig::default(), Arc::new(SystemClock))
    }
}

impl fmt::Debug for ReportRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportRenderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReportRenderer {
    #[must_use]
    pub fn new(config: ExportConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    #[must_use]
    pub const fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render a payload in the given format
    ///
    /// # Errors
    /// Returns `TrackerError::MalformedInput` if the core entity has no title,
    /// or a writer error if the format backend fails
    #[instrument(skip(self, payload), fields(entity = %payload.id()))]
    pub fn render(&self, payload: &ReportPayload, format: ExportFormat) -> Result<ExportArtifact> {
        let generated_at = self.clock.now();
        let document = build_document(payload, &self.config, generated_at)?;

        let bytes = match format {
            ExportFormat::StructuredDocument => structured::render(&document)?,
            ExportFormat::TabularText => tabular::render(&document)?,
            ExportFormat::KeyValueText => key_value::render(&document).into_bytes(),
        };

        let dated = format.dated_filename().then(|| generated_at.date_naive());
        let filename = export_filename(&document.title, format.extension(), dated);
        debug!(%filename, bytes = bytes.len(), "rendered export artifact");

        Ok(ExportArtifact {
            bytes,
            filename,
            mime_type: format.mime_type(),
            format,
        })
    }

    /// Render a payload and hand the artifact to a sink
    ///
    /// # Errors
    /// Returns rendering errors, or `TrackerError::Sink` if the sink rejects the artifact
    pub fn export_to(
        &self,
        payload: &ReportPayload,
        format: ExportFormat,
        sink: &dyn ArtifactSink,
    ) -> Result<ExportArtifact> {
        let artifact = self.render(payload, format)?;
        sink.save(&artifact)?;
        Ok(artifact)
    }
}

/// Render a payload with the default configuration and the system clock
///
/// # Errors
/// Returns `TrackerError::MalformedInput` if the core entity has no title
pub fn render_document(payload: &ReportPayload, format: ExportFormat) -> Result<ExportArtifact> {
    ReportRenderer::default().render(payload, format)
}
