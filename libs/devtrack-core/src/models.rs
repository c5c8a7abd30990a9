//! Data models for tracker entities
//!
//! These are the already-validated shapes the data layer hands to the core.
//! Dates are real calendar dates; every optional column is an `Option` and every
//! list-valued column defaults to empty.

use crate::error::{Result, TrackerError};
use chrono::{DateTime, NaiveDate, Utc};
use devtrack_common::format_file_size;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Clamp a completion percentage into 0–100
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_progress(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

/// Any integer progress, clamped into 0–100
fn deserialize_progress<'de, D>(deserializer: D) -> std::result::Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.map(clamp_progress))
}

/// Colour classification of a free-form status string
///
/// Status never influences layout; this only picks a tone for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Completed,
    InProgress,
    Pending,
    Cancelled,
    Blocked,
    Unknown,
}

impl StatusTone {
    /// Classify a status string; matching ignores case, and `-`/spaces count as `_`
    #[must_use]
    pub fn classify(status: &str) -> Self {
        let normalized: String = status
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "completed" | "complete" | "done" | "resolved" | "closed" => Self::Completed,
            "in_progress" | "active" | "ongoing" | "investigating" => Self::InProgress,
            "pending" | "planned" | "not_started" | "todo" | "open" => Self::Pending,
            "cancelled" | "canceled" | "abandoned" => Self::Cancelled,
            "blocked" | "on_hold" | "delayed" => Self::Blocked,
            _ => Self::Unknown,
        }
    }

    /// Display colour name used by the dashboard
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Completed => "green",
            Self::InProgress => "blue",
            Self::Pending => "gray",
            Self::Cancelled => "red",
            Self::Blocked => "orange",
            Self::Unknown => "slate",
        }
    }
}

/// Allocated and spent budget of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Allocated amount
    pub allocated: f64,
    /// Amount spent so far
    pub spent: Option<f64>,
}

impl Budget {
    /// Allocated minus spent, when spending is known
    #[must_use]
    pub fn remaining(&self) -> Option<f64> {
        self.spent.map(|spent| self.allocated - spent)
    }

    /// Spent as a percentage of allocated, when both are meaningful
    #[must_use]
    pub fn utilization(&self) -> Option<f64> {
        match self.spent {
            Some(spent) if self.allocated > 0.0 => {
                Some((spent / self.allocated * 1000.0).round() / 10.0)
            }
            _ => None,
        }
    }
}

/// Project entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: Uuid,
    /// Project title (required for export)
    pub title: String,
    /// Engineering system or plant area the project belongs to
    pub system: Option<String>,
    /// Free-form status
    pub status: Option<String>,
    /// Free-form priority
    pub priority: Option<String>,
    /// Planned start
    pub start_date: Option<NaiveDate>,
    /// Planned completion
    pub target_date: Option<NaiveDate>,
    /// Completion percentage (0–100)
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: Option<u8>,
    /// Tags in display order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Objective statement
    pub objective: Option<String>,
    /// Longer description
    pub description: Option<String>,
    /// Outcome once finished
    pub outcome: Option<String>,
    /// Success criteria in display order
    #[serde(default)]
    pub success_criteria: Vec<String>,
    /// Known risks
    #[serde(default)]
    pub risks: Vec<String>,
    /// Upstream dependencies
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Budget, when tracked
    pub budget: Option<Budget>,
    /// Team member names
    #[serde(default)]
    pub team_members: Vec<String>,
}

/// Milestone of a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: Option<u8>,
}

/// Task of a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// Milestone this task rolls up into
    pub milestone_id: Option<Uuid>,
}

/// Progress note posted against a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Attachment metadata; binary content never reaches the core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentMeta {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<u64>,
}

impl AttachmentMeta {
    /// Descriptive reference such as `wiring.pdf (application/pdf, 1.5 KB)`
    #[must_use]
    pub fn describe(&self) -> String {
        let details: Vec<String> = self
            .mime_type
            .iter()
            .cloned()
            .chain(self.size_bytes.map(format_file_size))
            .collect();
        if details.is_empty() {
            self.file_name.clone()
        } else {
            format!("{} ({})", self.file_name, details.join(", "))
        }
    }
}

/// Technical issue log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalLog {
    pub id: Uuid,
    pub title: String,
    pub system: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub occurred_on: Option<NaiveDate>,
    pub resolved_on: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub resolution: Option<String>,
    pub results: Option<String>,
    pub lessons_learned: Option<String>,
}

/// A project together with its related collections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectReport {
    pub project: Project,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub updates: Vec<ProjectUpdate>,
    #[serde(default)]
    pub attachments: Vec<AttachmentMeta>,
    /// Who requested the export
    pub generated_by: Option<String>,
}

impl ProjectReport {
    /// Title of the milestone with `id`, if it is part of this report
    #[must_use]
    pub fn milestone_title(&self, id: Uuid) -> Option<&str> {
        self.milestones
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.title.as_str())
    }
}

/// A technical log together with its attachments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogReport {
    pub log: TechnicalLog,
    #[serde(default)]
    pub attachments: Vec<AttachmentMeta>,
    /// Who requested the export
    pub generated_by: Option<String>,
}

/// Read-only snapshot handed to the export pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReportPayload {
    Project(ProjectReport),
    TechnicalLog(LogReport),
}

impl ReportPayload {
    /// Identifier of the core entity
    #[must_use]
    pub const fn id(&self) -> Uuid {
        match self {
            Self::Project(report) => report.project.id,
            Self::TechnicalLog(report) => report.log.id,
        }
    }

    /// Title of the core entity
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Project(report) => &report.project.title,
            Self::TechnicalLog(report) => &report.log.title,
        }
    }

    /// Human label of the report kind
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Project(_) => "Project Report",
            Self::TechnicalLog(_) => "Technical Log Report",
        }
    }

    /// Attachment metadata of the core entity
    #[must_use]
    pub fn attachments(&self) -> &[AttachmentMeta] {
        match self {
            Self::Project(report) => &report.attachments,
            Self::TechnicalLog(report) => &report.attachments,
        }
    }

    /// Who requested the export, if recorded
    #[must_use]
    pub fn generated_by(&self) -> Option<&str> {
        let name = match self {
            Self::Project(report) => report.generated_by.as_deref(),
            Self::TechnicalLog(report) => report.generated_by.as_deref(),
        };
        name.filter(|name| !name.trim().is_empty())
    }

    /// Check the identifying fields every export needs
    ///
    /// # Errors
    /// Returns `TrackerError::MalformedInput` if the core entity has a blank title
    pub fn validate(&self) -> Result<()> {
        if self.title().trim().is_empty() {
            let entity = match self {
                Self::Project(_) => "project",
                Self::TechnicalLog(_) => "technical log",
            };
            return Err(TrackerError::malformed(format!(
                "{entity} {} is missing its title",
                self.id()
            )));
        }
        Ok(())
    }
}
