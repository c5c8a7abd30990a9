//! Shared fixtures for integration tests

#![allow(dead_code)]

use devtrack_core::{
    ExportConfig, FixedClock, NaiveDate, ReportPayload, ReportRenderer,
};
use serde_json::json;
use std::sync::Arc;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Renderer pinned to Oct 16, 2026 00:00 UTC
pub fn fixed_renderer() -> ReportRenderer {
    ReportRenderer::new(
        ExportConfig::default(),
        Arc::new(FixedClock::at_date(date(2026, 10, 16))),
    )
}

/// Project payload with every optional field populated, as the data layer sends it
pub fn full_project_payload() -> ReportPayload {
    serde_json::from_value(json!({
        "type": "project",
        "project": {
            "id": "8d3f0c2e-5b7a-4c1d-9e2f-0a1b2c3d4e5f",
            "title": "Cooling Tower VFD Retrofit",
            "system": "Cooling Water",
            "status": "in_progress",
            "priority": "high",
            "start_date": "2026-08-03",
            "target_date": "2027-01-29",
            "progress": 35,
            "tags": ["hvac", "vfd", "energy"],
            "objective": "Cut fan energy with variable speed control",
            "description": "Retrofit three tower fans with drives and tie them into the BMS",
            "outcome": "Fans modulate on basin temperature",
            "success_criteria": ["Fan energy down 30%", "No nuisance trips"],
            "risks": ["Drive harmonics on the shared bus"],
            "dependencies": ["Harmonic study sign-off"],
            "budget": { "allocated": 48250.0, "spent": 12500.5 },
            "team_members": ["Priya Natarajan", "Lee Chambers"]
        },
        "milestones": [{
            "id": "1b7e2c4d-0000-4000-8000-000000000001",
            "title": "Drive Submittal Approved",
            "description": "Vendor submittal reviewed",
            "status": "completed",
            "start_date": "2026-08-10",
            "due_date": "2026-08-28",
            "progress": 100
        }],
        "tasks": [{
            "id": "1b7e2c4d-0000-4000-8000-000000000002",
            "title": "Megger fan motors",
            "description": "Insulation resistance test before energizing",
            "status": "pending",
            "priority": "medium",
            "assignee": "Lee Chambers",
            "start_date": "2026-10-19",
            "due_date": "2026-10-21",
            "milestone_id": "1b7e2c4d-0000-4000-8000-000000000001"
        }],
        "updates": [{
            "title": "Harmonic study received",
            "content": "THD within limits with line reactors",
            "created_at": "2026-09-15T14:00:00Z"
        }],
        "attachments": [
            { "file_name": "one-line.pdf", "mime_type": "application/pdf", "size_bytes": 2048 },
            { "file_name": "fan-curve.xlsx", "mime_type": null, "size_bytes": null }
        ],
        "generated_by": "Priya Natarajan"
    }))
    .unwrap()
}

/// Technical log payload with every optional field populated
pub fn full_log_payload() -> ReportPayload {
    serde_json::from_value(json!({
        "type": "technical_log",
        "log": {
            "id": "2c9a7d1e-0000-4000-8000-000000000010",
            "title": "Compressor Surge Event",
            "system": "Instrument Air",
            "status": "resolved",
            "priority": "critical",
            "occurred_on": "2026-09-02",
            "resolved_on": "2026-09-04",
            "tags": ["air", "compressor"],
            "description": "Compressor 2 surged during a demand spike",
            "resolution": "Retuned the anti-surge controller",
            "results": "Stable through two peak shifts",
            "lessons_learned": "Trend surge margin on the HMI"
        },
        "attachments": [
            { "file_name": "surge-trend.png", "mime_type": "image/png", "size_bytes": 40960 }
        ]
    }))
    .unwrap()
}

/// Project payload with only identifying fields
pub fn minimal_project_payload() -> ReportPayload {
    serde_json::from_value(json!({
        "type": "project",
        "project": {
            "id": "8d3f0c2e-5b7a-4c1d-9e2f-0a1b2c3d4e60",
            "title": "Lube Oil Survey"
        }
    }))
    .unwrap()
}

/// Every user-visible value of [`full_project_payload`] as rendered text
pub const FULL_PROJECT_VALUES: &[&str] = &[
    "Cooling Tower VFD Retrofit",
    "Cooling Water",
    "in_progress",
    "high",
    "Aug 03, 2026",
    "Jan 29, 2027",
    "35%",
    "hvac",
    "vfd",
    "energy",
    "Cut fan energy with variable speed control",
    "Retrofit three tower fans with drives and tie them into the BMS",
    "Fans modulate on basin temperature",
    "Fan energy down 30%",
    "No nuisance trips",
    "Drive harmonics on the shared bus",
    "Harmonic study sign-off",
    "$48,250.00",
    "$12,500.50",
    "$35,749.50",
    "25.9%",
    "Priya Natarajan",
    "Lee Chambers",
    "Drive Submittal Approved",
    "Vendor submittal reviewed",
    "completed",
    "Aug 10, 2026",
    "Aug 28, 2026",
    "100%",
    "Megger fan motors",
    "Insulation resistance test before energizing",
    "pending",
    "medium",
    "Oct 19, 2026",
    "Oct 21, 2026",
    "Harmonic study received",
    "THD within limits with line reactors",
    "Sep 15, 2026 14:00 UTC",
    "This entry contains 2 attachment(s)",
    "one-line.pdf",
    "application/pdf",
    "2.0 KB",
    "fan-curve.xlsx",
    "Oct 16, 2026 00:00 UTC",
];

/// Every user-visible value of [`full_log_payload`] as rendered text
pub const FULL_LOG_VALUES: &[&str] = &[
    "Compressor Surge Event",
    "Instrument Air",
    "resolved",
    "critical",
    "Sep 02, 2026",
    "Sep 04, 2026",
    "air",
    "compressor",
    "Compressor 2 surged during a demand spike",
    "Retuned the anti-surge controller",
    "Stable through two peak shifts",
    "Trend surge margin on the HMI",
    "This entry contains 1 attachment(s)",
    "surge-trend.png",
    "image/png",
    "40.0 KB",
    "Engineering Development Tracker",
];
