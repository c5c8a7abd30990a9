//! Relevance scoring for free-text search
//!
//! Scores are additive: the whole query found in the title or description,
//! then each whitespace-separated word found in either. Matching ignores case.

use crate::models::{Milestone, Project, ReportPayload, Task, TechnicalLog};
use crate::timeline::TimelineItem;
use devtrack_common::{
    DESCRIPTION_MATCH_WEIGHT, DESCRIPTION_WORD_WEIGHT, TITLE_MATCH_WEIGHT, TITLE_WORD_WEIGHT,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Relevance of one candidate; never negative, zero when nothing matches
#[must_use]
pub fn score(query: &str, title: &str, description: &str) -> u32 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0;
    }
    let title = title.to_lowercase();
    let description = description.to_lowercase();

    let mut total: u32 = 0;
    if title.contains(&query) {
        total = total.saturating_add(TITLE_MATCH_WEIGHT);
    }
    if description.contains(&query) {
        total = total.saturating_add(DESCRIPTION_MATCH_WEIGHT);
    }
    for word in query.split_whitespace() {
        if title.contains(word) {
            total = total.saturating_add(TITLE_WORD_WEIGHT);
        }
        if description.contains(word) {
            total = total.saturating_add(DESCRIPTION_WORD_WEIGHT);
        }
    }
    total
}

/// Anything with a title and an optional description
pub trait Searchable {
    fn search_title(&self) -> &str;

    fn search_description(&self) -> &str {
        ""
    }
}

/// Flattened search candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub id: String,
    /// Entity kind, e.g. `task` or `technical_log`
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl SearchEntry {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        title: impl Into<String>,
        description: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            title: title.into(),
            description: description.unwrap_or_default().to_string(),
        }
    }
}

/// A candidate and its score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit<T> {
    pub item: T,
    pub score: u32,
}

impl<T> SearchHit<T> {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.score > 0
    }
}

/// Score every candidate and sort by descending score
///
/// The sort is stable, so equal scores keep their input order. Zero-score
/// candidates are kept; filter with [`SearchHit::is_match`] if needed.
#[instrument(skip(candidates))]
pub fn rank<T: Searchable>(query: &str, candidates: Vec<T>) -> Vec<SearchHit<T>> {
    let mut hits: Vec<SearchHit<T>> = candidates
        .into_iter()
        .map(|item| {
            let score = score(query, item.search_title(), item.search_description());
            SearchHit { item, score }
        })
        .collect();
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    debug!(
        candidates = hits.len(),
        matches = hits.iter().filter(|h| h.is_match()).count(),
        "ranked search candidates"
    );
    hits
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_title(&self) -> &str {
        (**self).search_title()
    }

    fn search_description(&self) -> &str {
        (**self).search_description()
    }
}

impl Searchable for SearchEntry {
    fn search_title(&self) -> &str {
        &self.title
    }

    fn search_description(&self) -> &str {
        &self.description
    }
}

impl Searchable for Project {
    fn search_title(&self) -> &str {
        &self.title
    }

    fn search_description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

impl Searchable for Milestone {
    fn search_title(&self) -> &str {
        &self.title
    }

    fn search_description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

impl Searchable for Task {
    fn search_title(&self) -> &str {
        &self.title
    }

    fn search_description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

impl Searchable for TechnicalLog {
    fn search_title(&self) -> &str {
        &self.title
    }

    fn search_description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

impl Searchable for TimelineItem {
    fn search_title(&self) -> &str {
        self.title()
    }
}

impl ReportPayload {
    /// Core entity followed by its milestones, tasks and updates as search candidates
    #[must_use]
    pub fn search_entries(&self) -> Vec<SearchEntry> {
        match self {
            Self::Project(report) => {
                let project = &report.project;
                let mut entries = vec![SearchEntry::new(
                    project.id.to_string(),
                    "project",
                    project.title.as_str(),
                    project.description.as_deref(),
                )];
                entries.extend(report.milestones.iter().map(|m| {
                    SearchEntry::new(
                        m.id.to_string(),
                        "milestone",
                        m.title.as_str(),
                        m.description.as_deref(),
                    )
                }));
                entries.extend(report.tasks.iter().map(|t| {
                    SearchEntry::new(
                        t.id.to_string(),
                        "task",
                        t.title.as_str(),
                        t.description.as_deref(),
                    )
                }));
                entries.extend(report.updates.iter().enumerate().map(|(i, u)| {
                    SearchEntry::new(
                        format!("{}#update-{}", project.id, i + 1),
                        "update",
                        u.title.as_str(),
                        u.content.as_deref(),
                    )
                }));
                entries
            }
            Self::TechnicalLog(report) => vec![SearchEntry::new(
                report.log.id.to_string(),
                "technical_log",
                report.log.title.as_str(),
                report.log.description.as_deref(),
            )],
        }
    }
}
