//! Mock payloads and timeline items for tests and benchmarks

use crate::models::{
    AttachmentMeta, Budget, LogReport, Milestone, Project, ProjectReport, ProjectUpdate,
    ReportPayload, Task, TechnicalLog,
};
use crate::timeline::{ItemKind, TimelineItem};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

pub const PROJECT_ID: Uuid = Uuid::from_u128(0x550e_8400_e29b_41d4_a716_4466_5544_0010);
pub const LOG_ID: Uuid = Uuid::from_u128(0x550e_8400_e29b_41d4_a716_4466_5544_0020);
pub const FAT_MILESTONE_ID: Uuid = Uuid::from_u128(0x550e_8400_e29b_41d4_a716_4466_5544_0101);
pub const SAT_MILESTONE_ID: Uuid = Uuid::from_u128(0x550e_8400_e29b_41d4_a716_4466_5544_0102);

/// Calendar date for fixtures; out-of-range input collapses to `NaiveDate::MIN`
#[must_use]
pub fn mock_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn mock_instant(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    mock_date(year, month, day)
        .and_time(NaiveTime::MIN)
        .and_utc()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

/// Project with every optional field populated
#[must_use]
pub fn create_mock_project() -> Project {
    Project {
        id: PROJECT_ID,
        title: "Boiler Feed Pump Upgrade".to_string(),
        system: Some("Boiler House".to_string()),
        status: Some("in_progress".to_string()),
        priority: Some("high".to_string()),
        start_date: Some(mock_date(2026, 9, 1)),
        target_date: Some(mock_date(2026, 12, 18)),
        progress: Some(45),
        tags: strings(&["plc", "vfd", "safety"]),
        objective: Some("Replace fixed-speed feed pumps with VFD drives".to_string()),
        description: Some("Retrofit both boiler feed pumps and integrate them with SCADA".to_string()),
        outcome: Some("Pumps commissioned with closed-loop pressure control".to_string()),
        success_criteria: strings(&["Energy use down 20%", "Zero unplanned trips"]),
        risks: strings(&["Long lead time on drives"]),
        dependencies: strings(&["Electrical room expansion"]),
        budget: Some(Budget {
            allocated: 20_000.0,
            spent: Some(12_500.0),
        }),
        team_members: strings(&["Dana Reyes", "Sam Okafor"]),
    }
}

#[must_use]
pub fn create_mock_milestones() -> Vec<Milestone> {
    vec![
        Milestone {
            id: FAT_MILESTONE_ID,
            title: "Factory Acceptance Test".to_string(),
            description: Some("Witnessed test at the panel builder".to_string()),
            status: Some("pending".to_string()),
            start_date: Some(mock_date(2026, 10, 12)),
            due_date: Some(mock_date(2026, 10, 16)),
            progress: Some(20),
        },
        Milestone {
            id: SAT_MILESTONE_ID,
            title: "Site Acceptance Test".to_string(),
            description: None,
            status: Some("planned".to_string()),
            start_date: None,
            due_date: Some(mock_date(2026, 11, 20)),
            progress: None,
        },
    ]
}

#[must_use]
pub fn create_mock_tasks() -> Vec<Task> {
    vec![
        Task {
            id: Uuid::from_u128(0x550e_8400_e29b_41d4_a716_4466_5544_0201),
            title: "Panel wiring review".to_string(),
            description: Some("Check terminations against the loop drawings".to_string()),
            status: Some("in_progress".to_string()),
            priority: Some("medium".to_string()),
            assignee: Some("Sam Okafor".to_string()),
            start_date: Some(mock_date(2026, 10, 5)),
            due_date: Some(mock_date(2026, 10, 14)),
            milestone_id: Some(FAT_MILESTONE_ID),
        },
        Task {
            id: Uuid::from_u128(0x550e_8400_e29b_41d4_a716_4466_5544_0202),
            title: "Loop checks".to_string(),
            description: None,
            status: Some("todo".to_string()),
            priority: None,
            assignee: None,
            start_date: None,
            due_date: Some(mock_date(2026, 11, 2)),
            milestone_id: None,
        },
    ]
}

#[must_use]
pub fn create_mock_attachments() -> Vec<AttachmentMeta> {
    vec![
        AttachmentMeta {
            file_name: "wiring.pdf".to_string(),
            mime_type: Some("application/pdf".to_string()),
            size_bytes: Some(1536),
        },
        AttachmentMeta {
            file_name: "pump-curve.png".to_string(),
            mime_type: Some("image/png".to_string()),
            size_bytes: Some(204_800),
        },
    ]
}

/// Project report with every optional field and collection populated
#[must_use]
pub fn create_full_project_payload() -> ReportPayload {
    ReportPayload::Project(ProjectReport {
        project: create_mock_project(),
        milestones: create_mock_milestones(),
        tasks: create_mock_tasks(),
        updates: vec![ProjectUpdate {
            title: "Drives delivered".to_string(),
            content: Some("Both drives received and inspected".to_string()),
            created_at: mock_instant(2026, 10, 2),
        }],
        attachments: create_mock_attachments(),
        generated_by: Some("Dana Reyes".to_string()),
    })
}

/// Project report with only identifying fields
#[must_use]
pub fn create_minimal_project_payload() -> ReportPayload {
    ReportPayload::Project(ProjectReport {
        project: Project {
            id: PROJECT_ID,
            title: "Spare Parts Audit".to_string(),
            system: None,
            status: None,
            priority: None,
            start_date: None,
            target_date: None,
            progress: None,
            tags: Vec::new(),
            objective: None,
            description: None,
            outcome: None,
            success_criteria: Vec::new(),
            risks: Vec::new(),
            dependencies: Vec::new(),
            budget: None,
            team_members: Vec::new(),
        },
        milestones: Vec::new(),
        tasks: Vec::new(),
        updates: Vec::new(),
        attachments: Vec::new(),
        generated_by: None,
    })
}

/// Technical log with every optional field populated
#[must_use]
pub fn create_full_log_payload() -> ReportPayload {
    ReportPayload::TechnicalLog(LogReport {
        log: TechnicalLog {
            id: LOG_ID,
            title: "PLC Issue on Line 3".to_string(),
            system: Some("Packaging Line 3".to_string()),
            status: Some("resolved".to_string()),
            priority: Some("critical".to_string()),
            occurred_on: Some(mock_date(2026, 10, 6)),
            resolved_on: Some(mock_date(2026, 10, 8)),
            tags: strings(&["plc", "scada", "fault"]),
            description: Some("Intermittent watchdog fault halting the filler".to_string()),
            resolution: Some("Replaced the failing backplane module".to_string()),
            results: Some("No faults in 72 hours of operation".to_string()),
            lessons_learned: Some("Keep a spare backplane on site".to_string()),
        },
        attachments: vec![AttachmentMeta {
            file_name: "fault-trend.csv".to_string(),
            mime_type: Some("text/csv".to_string()),
            size_bytes: Some(512),
        }],
        generated_by: Some("Sam Okafor".to_string()),
    })
}

/// Technical log with only identifying fields
#[must_use]
pub fn create_minimal_log_payload() -> ReportPayload {
    ReportPayload::TechnicalLog(LogReport {
        log: TechnicalLog {
            id: LOG_ID,
            title: "Chiller Alarm".to_string(),
            system: None,
            status: None,
            priority: None,
            occurred_on: None,
            resolved_on: None,
            tags: Vec::new(),
            description: None,
            resolution: None,
            results: None,
            lessons_learned: None,
        },
        attachments: Vec::new(),
        generated_by: None,
    })
}

/// A milestone and three tasks around the week of Oct 12, 2026
#[must_use]
pub fn create_mock_timeline_items() -> Vec<TimelineItem> {
    vec![
        TimelineItem::new(
            "task-wiring",
            "Panel wiring review",
            ItemKind::Task,
            mock_date(2026, 10, 5),
            Some(mock_date(2026, 10, 14)),
        )
        .with_status("in_progress"),
        TimelineItem::new(
            "ms-fat",
            "Factory Acceptance Test",
            ItemKind::Milestone,
            mock_date(2026, 10, 16),
            None,
        )
        .with_status("pending")
        .with_progress(20),
        TimelineItem::new(
            "task-loops",
            "Loop checks",
            ItemKind::Task,
            mock_date(2026, 11, 2),
            None,
        )
        .with_status("todo"),
        TimelineItem::new(
            "task-docs",
            "As-built drawings",
            ItemKind::Task,
            mock_date(2026, 10, 15),
            Some(mock_date(2026, 10, 30)),
        ),
    ]
}

/// `count` tasks of varying length starting daily from `start`
#[must_use]
pub fn create_bulk_timeline_items(count: usize, start: NaiveDate) -> Vec<TimelineItem> {
    start
        .iter_days()
        .take(count)
        .enumerate()
        .map(|(i, day)| {
            let length = u64::try_from(i % 21).unwrap_or_default();
            let end = day.checked_add_days(chrono::Days::new(length));
            let kind = if i % 10 == 0 {
                ItemKind::Milestone
            } else {
                ItemKind::Task
            };
            TimelineItem::new(format!("item-{i}"), format!("Item {i}"), kind, day, end)
        })
        .collect()
}
