//! Destinations for rendered artifacts

use crate::error::Result;
use crate::export::ExportArtifact;
use parking_lot::RwLock;
use tracing::debug;

/// File-save collaborator
///
/// The core never touches the filesystem itself; the caller supplies where
/// artifacts go.
pub trait ArtifactSink: Send + Sync {
    /// Persist one artifact
    ///
    /// # Errors
    /// Returns `TrackerError::Sink` or `TrackerError::Io` if the artifact
    /// cannot be stored
    fn save(&self, artifact: &ExportArtifact) -> Result<()>;
}

/// Sink that keeps artifacts in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    artifacts: RwLock<Vec<ExportArtifact>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.artifacts.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.artifacts.read().is_empty()
    }

    /// Filenames in save order
    #[must_use]
    pub fn filenames(&self) -> Vec<String> {
        self.artifacts
            .read()
            .iter()
            .map(|a| a.filename.clone())
            .collect()
    }

    /// Most recently saved artifact with `filename`
    #[must_use]
    pub fn get(&self, filename: &str) -> Option<ExportArtifact> {
        self.artifacts
            .read()
            .iter()
            .rev()
            .find(|a| a.filename == filename)
            .cloned()
    }

    /// Remove and return everything saved so far
    pub fn take(&self) -> Vec<ExportArtifact> {
        std::mem::take(&mut *self.artifacts.write())
    }
}

impl ArtifactSink for MemorySink {
    fn save(&self, artifact: &ExportArtifact) -> Result<()> {
        debug!(filename = %artifact.filename, "storing artifact in memory");
        self.artifacts.write().push(artifact.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportFormat;

    fn artifact(name: &str, body: &str) -> ExportArtifact {
        ExportArtifact {
            bytes: body.as_bytes().to_vec(),
            filename: name.to_string(),
            mime_type: ExportFormat::KeyValueText.mime_type(),
            format: ExportFormat::KeyValueText,
        }
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());
        sink.save(&artifact("a.md", "first")).unwrap();
        sink.save(&artifact("b.md", "second")).unwrap();
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.filenames(), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_memory_sink_get_latest() {
        let sink = MemorySink::new();
        sink.save(&artifact("a.md", "old")).unwrap();
        sink.save(&artifact("a.md", "new")).unwrap();
        assert_eq!(sink.get("a.md").unwrap().bytes, b"new");
        assert!(sink.get("missing.md").is_none());
    }

    #[test]
    fn test_memory_sink_take_drains() {
        let sink = MemorySink::new();
        sink.save(&artifact("a.md", "x")).unwrap();
        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty());
    }
}
