//! Data-source collaborator for export payloads

use crate::error::{Result, TrackerError};
use crate::models::{LogReport, ProjectReport, ReportPayload};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// Supplies read-only snapshots of the entities the core renders
pub trait ReportSource: Send + Sync {
    /// A project with its milestones, tasks, updates and attachments
    ///
    /// # Errors
    /// Returns `TrackerError::NotFound` if no project has this id
    fn fetch_project_with_relations(&self, id: Uuid) -> Result<ProjectReport>;

    /// A technical log with its attachments
    ///
    /// # Errors
    /// Returns `TrackerError::NotFound` if no log has this id
    fn fetch_technical_log(&self, id: Uuid) -> Result<LogReport>;

    /// Whichever entity has this id, projects first
    ///
    /// # Errors
    /// Returns `TrackerError::NotFound` if neither kind has this id
    fn fetch_payload(&self, id: Uuid) -> Result<ReportPayload> {
        match self.fetch_project_with_relations(id) {
            Ok(report) => Ok(ReportPayload::Project(report)),
            Err(TrackerError::NotFound { .. }) => self
                .fetch_technical_log(id)
                .map(ReportPayload::TechnicalLog)
                .map_err(|e| match e {
                    TrackerError::NotFound { .. } => TrackerError::NotFound {
                        entity: "Report entity",
                        id: id.to_string(),
                    },
                    other => other,
                }),
            Err(e) => Err(e),
        }
    }
}

/// In-memory source built from payload snapshots
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    projects: HashMap<Uuid, ProjectReport>,
    logs: HashMap<Uuid, LogReport>,
}

impl SnapshotSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a snapshot
    pub fn insert(&mut self, payload: ReportPayload) {
        match payload {
            ReportPayload::Project(report) => {
                self.projects.insert(report.project.id, report);
            }
            ReportPayload::TechnicalLog(report) => {
                self.logs.insert(report.log.id, report);
            }
        }
    }

    #[must_use]
    pub fn from_payloads(payloads: impl IntoIterator<Item = ReportPayload>) -> Self {
        let mut source = Self::new();
        for payload in payloads {
            source.insert(payload);
        }
        source
    }

    /// Load snapshots from a JSON file holding one payload or an array of payloads
    ///
    /// # Errors
    /// Returns `TrackerError::Io` if the file cannot be read, or
    /// `TrackerError::Serialization` if it is not valid payload JSON
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        let payloads: Vec<ReportPayload> = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            vec![serde_json::from_value(value)?]
        };
        info!(path = %path.display(), count = payloads.len(), "loaded report snapshots");
        Ok(Self::from_payloads(payloads))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len() + self.logs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.logs.is_empty()
    }

    /// Every snapshot, projects before logs
    #[must_use]
    pub fn payloads(&self) -> Vec<ReportPayload> {
        self.projects
            .values()
            .cloned()
            .map(ReportPayload::Project)
            .chain(self.logs.values().cloned().map(ReportPayload::TechnicalLog))
            .collect()
    }
}

impl ReportSource for SnapshotSource {
    fn fetch_project_with_relations(&self, id: Uuid) -> Result<ProjectReport> {
        debug!(%id, "fetching project snapshot");
        self.projects
            .get(&id)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound {
                entity: "Project",
                id: id.to_string(),
            })
    }

    fn fetch_technical_log(&self, id: Uuid) -> Result<LogReport> {
        debug!(%id, "fetching technical log snapshot");
        self.logs
            .get(&id)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound {
                entity: "Technical log",
                id: id.to_string(),
            })
    }
}
