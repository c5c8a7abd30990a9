//! Timeline items and the normalization boundary that produces them

use crate::error::{Result, TrackerError};
use crate::models::{clamp_progress, Milestone, ProjectReport, StatusTone, Task};
use chrono::NaiveDate;
use devtrack_common::parse_date;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Classification of a timeline item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Milestone,
    Task,
}

impl ItemKind {
    /// Lower values draw first (milestones above tasks)
    #[must_use]
    pub const fn render_priority(self) -> u8 {
        match self {
            Self::Milestone => 0,
            Self::Task => 1,
        }
    }

    /// Single-character marker used in text renderings
    #[must_use]
    pub const fn icon(self) -> char {
        match self {
            Self::Milestone => '◆',
            Self::Task => '■',
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Milestone => "Milestone",
            Self::Task => "Task",
        }
    }
}

/// Timeline item as fetched, with dates still in string form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTimelineItem {
    pub id: String,
    pub title: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
}

/// A dated unit placed on the timeline
///
/// Immutable once built: the end date is always present and never precedes
/// the start date, and progress is within 0–100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimelineItem")]
pub struct TimelineItem {
    id: String,
    title: String,
    kind: ItemKind,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: String,
    progress: Option<u8>,
}

impl TimelineItem {
    /// Build an item; a missing end collapses to the start, and an end before
    /// the start is clamped to the start
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: ItemKind,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        let end_date = end_date.map_or(start_date, |end| end.max(start_date));
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            start_date,
            end_date,
            status: String::new(),
            progress: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Attach a progress percentage, clamped to 0–100
    #[must_use]
    pub fn with_progress(mut self, progress: i64) -> Self {
        self.progress = Some(clamp_progress(progress));
        self
    }

    /// Normalize a fetched item
    ///
    /// # Errors
    /// Returns `TrackerError::MalformedInput` if the start date is missing or
    /// either date cannot be parsed
    pub fn try_from_raw(raw: RawTimelineItem) -> Result<Self> {
        let start = raw
            .start_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                TrackerError::malformed(format!("timeline item {} has no start date", raw.id))
            })?;
        let start = parse_item_date(&raw.id, "start", start)?;
        let end = raw
            .end_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_item_date(&raw.id, "end", s))
            .transpose()?;

        if let Some(end) = end {
            if end < start {
                debug!(id = %raw.id, %start, %end, "clamping end date that precedes start date");
            }
        }

        let mut item = Self::new(raw.id, raw.title, raw.kind, start, end)
            .with_status(raw.status.unwrap_or_default());
        if let Some(progress) = raw.progress {
            item = item.with_progress(progress);
        }
        Ok(item)
    }

    /// Timeline item for a milestone; the start falls back to the due date,
    /// and milestones with neither are not schedulable
    #[must_use]
    pub fn from_milestone(milestone: &Milestone) -> Option<Self> {
        let start = milestone.start_date.or(milestone.due_date)?;
        let mut item = Self::new(
            milestone.id.to_string(),
            milestone.title.clone(),
            ItemKind::Milestone,
            start,
            milestone.due_date,
        )
        .with_status(milestone.status.clone().unwrap_or_default());
        if let Some(progress) = milestone.progress {
            item = item.with_progress(i64::from(progress));
        }
        Some(item)
    }

    /// Timeline item for a task; the start falls back to the due date, and
    /// tasks with neither are not schedulable
    #[must_use]
    pub fn from_task(task: &Task) -> Option<Self> {
        let start = task.start_date.or(task.due_date)?;
        Some(
            Self::new(
                task.id.to_string(),
                task.title.clone(),
                ItemKind::Task,
                start,
                task.due_date,
            )
            .with_status(task.status.clone().unwrap_or_default()),
        )
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Effective end date (equal to the start for point-in-time items)
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub const fn progress(&self) -> Option<u8> {
        self.progress
    }

    /// Whether the item occupies a single day
    #[must_use]
    pub fn is_point_in_time(&self) -> bool {
        self.start_date == self.end_date
    }

    /// Colour classification of the status
    #[must_use]
    pub fn tone(&self) -> StatusTone {
        StatusTone::classify(&self.status)
    }
}

impl TryFrom<RawTimelineItem> for TimelineItem {
    type Error = TrackerError;

    fn try_from(raw: RawTimelineItem) -> Result<Self> {
        Self::try_from_raw(raw)
    }
}

impl From<TimelineItem> for RawTimelineItem {
    fn from(item: TimelineItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            kind: item.kind,
            start_date: Some(item.start_date.to_string()),
            end_date: Some(item.end_date.to_string()),
            status: Some(item.status).filter(|s| !s.is_empty()),
            progress: item.progress.map(i64::from),
        }
    }
}

fn parse_item_date(id: &str, which: &str, value: &str) -> Result<NaiveDate> {
    parse_date(value).map_err(|e| {
        TrackerError::malformed(format!(
            "timeline item {id} has an unparseable {which} date '{value}': {e}"
        ))
    })
}

/// Normalize a batch of fetched items
///
/// Items without a start date are skipped, since they cannot be scheduled;
/// any unparseable date rejects the whole batch.
///
/// # Errors
/// Returns `TrackerError::MalformedInput` for the first unparseable date
pub fn normalize_items(raw_items: Vec<RawTimelineItem>) -> Result<Vec<TimelineItem>> {
    let mut items = Vec::with_capacity(raw_items.len());
    for raw in raw_items {
        if raw.start_date.as_deref().map_or(true, |s| s.trim().is_empty()) {
            debug!(id = %raw.id, "skipping timeline item without a start date");
            continue;
        }
        items.push(TimelineItem::try_from_raw(raw)?);
    }
    Ok(items)
}

/// Schedulable milestones followed by schedulable tasks of a project
#[must_use]
pub fn timeline_items_for_project(report: &ProjectReport) -> Vec<TimelineItem> {
    report
        .milestones
        .iter()
        .filter_map(TimelineItem::from_milestone)
        .chain(report.tasks.iter().filter_map(TimelineItem::from_task))
        .collect()
}
