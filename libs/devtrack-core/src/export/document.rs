//! Format-independent report layout
//!
//! Every export format renders the same [`ReportDocument`], so section order
//! and placeholder handling live here once.

use crate::error::Result;
use crate::export::ExportConfig;
use crate::models::{LogReport, ProjectReport, ReportPayload};
use chrono::{DateTime, NaiveDate, Utc};
use devtrack_common::{
    format_currency, format_datetime, format_display_date, format_file_size, format_percentage,
    NONE_LISTED, NOT_SET, UNASSIGNED,
};

/// Labelled scalar value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Itemized collection with a fixed header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    /// Rendered instead of rows when there are none
    pub empty_message: &'static str,
}

/// Content of a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Fields(Vec<Field>),
    /// Ordered entries; `placeholder` is rendered when there are none
    List {
        items: Vec<String>,
        placeholder: &'static str,
    },
    Text(String),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: &'static str,
    pub note: Option<String>,
    pub content: Option<Block>,
    pub subsections: Vec<Section>,
}

impl Section {
    fn with_content(heading: &'static str, content: Block) -> Self {
        Self {
            heading,
            note: None,
            content: Some(content),
            subsections: Vec::new(),
        }
    }

    fn with_subsections(heading: &'static str, subsections: Vec<Self>) -> Self {
        Self {
            heading,
            note: None,
            content: None,
            subsections,
        }
    }

    fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }
}

/// A report laid out as title, ordered sections and a generation footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: String,
    /// Report kind, e.g. "Project Report"
    pub subtitle: &'static str,
    /// `project` or `technical_log`
    pub entity_type: &'static str,
    pub sections: Vec<Section>,
    pub footer: Vec<Field>,
}

/// Lay out a payload
///
/// # Errors
/// Returns `TrackerError::MalformedInput` if the core entity has no title
pub fn build_document(
    payload: &ReportPayload,
    config: &ExportConfig,
    generated_at: DateTime<Utc>,
) -> Result<ReportDocument> {
    payload.validate()?;

    let (entity_type, mut sections) = match payload {
        ReportPayload::Project(report) => ("project", project_sections(report, config)),
        ReportPayload::TechnicalLog(report) => ("technical_log", log_sections(report)),
    };
    sections.push(attachments_section(payload));

    let generated_by = payload
        .generated_by()
        .map_or_else(|| config.generated_by.clone(), str::to_string);

    Ok(ReportDocument {
        title: payload.title().trim().to_string(),
        subtitle: payload.kind_label(),
        entity_type,
        sections,
        footer: vec![
            Field::new("Generated By", generated_by),
            Field::new("Generated At", format_datetime(&generated_at)),
        ],
    })
}

fn text_or_placeholder(value: Option<&String>) -> String {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map_or_else(|| NOT_SET.to_string(), str::to_string)
}

fn date_or_placeholder(value: Option<NaiveDate>) -> String {
    value.map_or_else(|| NOT_SET.to_string(), |d| format_display_date(&d))
}

fn progress_or_placeholder(value: Option<u8>) -> String {
    value.map_or_else(|| NOT_SET.to_string(), |p| format_percentage(f64::from(p.min(100))))
}

fn list(items: &[String], placeholder: &'static str) -> Block {
    Block::List {
        items: items.to_vec(),
        placeholder,
    }
}

fn text_section(heading: &'static str, value: Option<&String>) -> Section {
    Section::with_content(heading, Block::Text(text_or_placeholder(value)))
}

fn project_sections(report: &ProjectReport, config: &ExportConfig) -> Vec<Section> {
    let project = &report.project;
    let currency = |amount: Option<f64>| {
        amount.map_or_else(
            || NOT_SET.to_string(),
            |a| format_currency(a, &config.currency_symbol),
        )
    };
    let budget = project.budget.as_ref();

    let overview = Section::with_content(
        "Overview",
        Block::Fields(vec![
            Field::new("System", text_or_placeholder(project.system.as_ref())),
            Field::new("Status", text_or_placeholder(project.status.as_ref())),
            Field::new("Priority", text_or_placeholder(project.priority.as_ref())),
            Field::new("Start Date", date_or_placeholder(project.start_date)),
            Field::new("Target Date", date_or_placeholder(project.target_date)),
            Field::new("Progress", progress_or_placeholder(project.progress)),
        ]),
    );

    let details = Section::with_subsections(
        "Details",
        vec![
            text_section("Objective", project.objective.as_ref()),
            text_section("Description", project.description.as_ref()),
            text_section("Outcome", project.outcome.as_ref()),
            Section::with_content(
                "Success Criteria",
                list(&project.success_criteria, NONE_LISTED),
            ),
            Section::with_content("Risks", list(&project.risks, NONE_LISTED)),
            Section::with_content("Dependencies", list(&project.dependencies, NONE_LISTED)),
        ],
    );

    let budget = Section::with_content(
        "Budget",
        Block::Fields(vec![
            Field::new("Allocated", currency(budget.map(|b| b.allocated))),
            Field::new("Spent", currency(budget.and_then(|b| b.spent))),
            Field::new("Remaining", currency(budget.and_then(|b| b.remaining()))),
            Field::new(
                "Utilization",
                budget
                    .and_then(|b| b.utilization())
                    .map_or_else(|| NOT_SET.to_string(), format_percentage),
            ),
        ]),
    );

    let milestones = Section::with_content(
        "Milestones",
        Block::Table(Table {
            columns: vec![
                "Title",
                "Description",
                "Status",
                "Start Date",
                "Due Date",
                "Progress",
            ],
            rows: report
                .milestones
                .iter()
                .map(|m| {
                    vec![
                        m.title.clone(),
                        text_or_placeholder(m.description.as_ref()),
                        text_or_placeholder(m.status.as_ref()),
                        date_or_placeholder(m.start_date),
                        date_or_placeholder(m.due_date),
                        progress_or_placeholder(m.progress),
                    ]
                })
                .collect(),
            empty_message: "No milestones recorded",
        }),
    );

    let tasks = Section::with_content(
        "Tasks",
        Block::Table(Table {
            columns: vec![
                "Title",
                "Description",
                "Status",
                "Priority",
                "Assignee",
                "Start Date",
                "Due Date",
                "Milestone",
            ],
            rows: report
                .tasks
                .iter()
                .map(|t| {
                    let milestone = t
                        .milestone_id
                        .and_then(|id| report.milestone_title(id))
                        .unwrap_or(NONE_LISTED);
                    vec![
                        t.title.clone(),
                        text_or_placeholder(t.description.as_ref()),
                        text_or_placeholder(t.status.as_ref()),
                        text_or_placeholder(t.priority.as_ref()),
                        t.assignee
                            .as_deref()
                            .map(str::trim)
                            .filter(|a| !a.is_empty())
                            .unwrap_or(UNASSIGNED)
                            .to_string(),
                        date_or_placeholder(t.start_date),
                        date_or_placeholder(t.due_date),
                        milestone.to_string(),
                    ]
                })
                .collect(),
            empty_message: "No tasks recorded",
        }),
    );

    let updates = Section::with_content(
        "Progress Updates",
        Block::Table(Table {
            columns: vec!["Title", "Content", "Posted"],
            rows: report
                .updates
                .iter()
                .map(|u| {
                    vec![
                        u.title.clone(),
                        text_or_placeholder(u.content.as_ref()),
                        format_datetime(&u.created_at),
                    ]
                })
                .collect(),
            empty_message: "No updates recorded",
        }),
    );

    vec![
        overview,
        Section::with_content("Tags", list(&project.tags, NONE_LISTED)),
        details,
        budget,
        Section::with_content("Team", list(&project.team_members, UNASSIGNED)),
        milestones,
        tasks,
        updates,
    ]
}

fn log_sections(report: &LogReport) -> Vec<Section> {
    let log = &report.log;
    vec![
        Section::with_content(
            "Overview",
            Block::Fields(vec![
                Field::new("System", text_or_placeholder(log.system.as_ref())),
                Field::new("Status", text_or_placeholder(log.status.as_ref())),
                Field::new("Priority", text_or_placeholder(log.priority.as_ref())),
                Field::new("Occurred On", date_or_placeholder(log.occurred_on)),
                Field::new("Resolved On", date_or_placeholder(log.resolved_on)),
            ]),
        ),
        Section::with_content("Tags", list(&log.tags, NONE_LISTED)),
        Section::with_subsections(
            "Details",
            vec![
                text_section("Description", log.description.as_ref()),
                text_section("Resolution", log.resolution.as_ref()),
                text_section("Results", log.results.as_ref()),
                text_section("Lessons Learned", log.lessons_learned.as_ref()),
            ],
        ),
    ]
}

fn attachments_section(payload: &ReportPayload) -> Section {
    let attachments = payload.attachments();
    Section::with_content(
        "Attachments",
        Block::Table(Table {
            columns: vec!["File Name", "Type", "Size"],
            rows: attachments
                .iter()
                .map(|a| {
                    vec![
                        a.file_name.clone(),
                        text_or_placeholder(a.mime_type.as_ref()),
                        a.size_bytes
                            .map_or_else(|| NOT_SET.to_string(), format_file_size),
                    ]
                })
                .collect(),
            empty_message: "No attachments",
        }),
    )
    .with_note(format!(
        "This entry contains {} attachment(s)",
        attachments.len()
    ))
}
