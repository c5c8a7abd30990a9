//! Export pipeline tests across all three formats
//!
//! Every format must show every populated field, substitute placeholders for
//! absent ones, and keep the same section order.

mod common;

use common::{
    fixed_renderer, full_log_payload, full_project_payload, minimal_project_payload,
    FULL_LOG_VALUES, FULL_PROJECT_VALUES,
};
use devtrack_core::{ExportFormat, MemorySink, ReportPayload, TrackerError};

const ALL_FORMATS: [ExportFormat; 3] = [
    ExportFormat::StructuredDocument,
    ExportFormat::TabularText,
    ExportFormat::KeyValueText,
];

fn render_text(payload: &ReportPayload, format: ExportFormat) -> String {
    let artifact = fixed_renderer().render(payload, format).unwrap();
    String::from_utf8(artifact.bytes).unwrap()
}

#[test]
fn test_full_project_shows_every_field_in_every_format() {
    let payload = full_project_payload();
    for format in ALL_FORMATS {
        let text = render_text(&payload, format);
        for value in FULL_PROJECT_VALUES {
            assert!(
                text.contains(value),
                "{format} export is missing '{value}'"
            );
        }
    }
}

#[test]
fn test_full_log_shows_every_field_in_every_format() {
    let payload = full_log_payload();
    for format in ALL_FORMATS {
        let text = render_text(&payload, format);
        for value in FULL_LOG_VALUES {
            assert!(
                text.contains(value),
                "{format} export is missing '{value}'"
            );
        }
    }
}

#[test]
fn test_minimal_project_uses_placeholders_in_every_format() {
    let payload = minimal_project_payload();
    for format in ALL_FORMATS {
        let text = render_text(&payload, format);
        assert!(text.contains("Lube Oil Survey"), "{format}: title");
        assert!(text.contains("Not set"), "{format}: scalar placeholder");
        assert!(text.contains("Unassigned"), "{format}: team placeholder");
        assert!(text.contains("None"), "{format}: list placeholder");
        assert!(text.contains("No milestones recorded"), "{format}");
        assert!(text.contains("No tasks recorded"), "{format}");
        assert!(text.contains("No attachments"), "{format}");
        assert!(
            text.contains("This entry contains 0 attachment(s)"),
            "{format}"
        );
    }
}

#[test]
fn test_markdown_has_one_placeholder_per_absent_scalar() {
    let text = render_text(&minimal_project_payload(), ExportFormat::KeyValueText);
    for label in [
        "System",
        "Status",
        "Priority",
        "Start Date",
        "Target Date",
        "Progress",
        "Allocated",
        "Spent",
        "Remaining",
        "Utilization",
    ] {
        assert!(
            text.contains(&format!("{label}: Not set")),
            "missing placeholder for {label}"
        );
    }
}

#[test]
fn test_section_order_is_shared() {
    let document_headings = [
        "Overview",
        "Tags",
        "Details",
        "Budget",
        "Team",
        "Milestones",
        "Tasks",
        "Attachments",
        "Generated",
    ];
    // CSV flattens scalar sections into the entity row, so its markers are column names
    let csv_markers = [
        "System",
        "Tags",
        "Objective",
        "Allocated",
        "Team",
        "Milestones",
        "Tasks",
        "Attachments",
        "Generated",
    ];

    let payload = full_project_payload();
    for format in ALL_FORMATS {
        let markers = match format {
            ExportFormat::TabularText => csv_markers,
            _ => document_headings,
        };
        let text = render_text(&payload, format);
        let positions: Vec<usize> = markers
            .iter()
            .map(|h| {
                text.find(h)
                    .unwrap_or_else(|| panic!("{format}: missing {h}"))
            })
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "{format}: sections out of order {positions:?}"
        );
    }
}

#[test]
fn test_list_order_is_preserved() {
    let payload = full_project_payload();
    for format in ALL_FORMATS {
        let text = render_text(&payload, format);
        let hvac = text.find("hvac").unwrap();
        let vfd = text.find("vfd").unwrap();
        let energy = text.find("energy").unwrap();
        assert!(hvac < vfd && vfd < energy, "{format}: tag order");
    }
}

#[test]
fn test_csv_joins_lists_into_one_cell() {
    let text = render_text(&full_project_payload(), ExportFormat::TabularText);
    assert!(text.contains("\"hvac, vfd, energy\""));
    assert!(text.contains("\"Priya Natarajan, Lee Chambers\""));
}

#[test]
fn test_blank_title_fails_every_format() {
    let mut payload = full_project_payload();
    if let ReportPayload::Project(report) = &mut payload {
        report.project.title = "  ".to_string();
    }
    let sink = MemorySink::new();
    for format in ALL_FORMATS {
        let err = fixed_renderer()
            .export_to(&payload, format, &sink)
            .unwrap_err();
        assert!(matches!(err, TrackerError::MalformedInput { .. }));
    }
    assert!(sink.is_empty(), "no partial output may be saved");
}

#[test]
fn test_unsupported_format_names() {
    for name in ["pdf", "json", "html", "xlsx"] {
        assert!(matches!(
            name.parse::<ExportFormat>(),
            Err(TrackerError::UnsupportedFormat { .. })
        ));
    }
}

#[test]
fn test_filenames_and_mime_types() {
    let payload = full_project_payload();
    let renderer = fixed_renderer();

    let xml = renderer
        .render(&payload, ExportFormat::StructuredDocument)
        .unwrap();
    assert_eq!(xml.filename, "cooling-tower-vfd-retrofit.xml");
    assert_eq!(xml.mime_type, "application/xml");

    let csv = renderer.render(&payload, ExportFormat::TabularText).unwrap();
    assert_eq!(csv.filename, "cooling-tower-vfd-retrofit-2026-10-16.csv");
    assert_eq!(csv.mime_type, "text/csv");

    let md = renderer.render(&payload, ExportFormat::KeyValueText).unwrap();
    assert_eq!(md.filename, "cooling-tower-vfd-retrofit.md");
    assert_eq!(md.mime_type, "text/markdown");
}
