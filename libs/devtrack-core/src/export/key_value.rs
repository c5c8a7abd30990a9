//! Markdown-flavoured `Label: value` text

use crate::export::document::{Block, ReportDocument, Section, Table};
use std::fmt::Write;

/// Render a document as Markdown text
#[must_use]
pub fn render(document: &ReportDocument) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "# {}", document.title);
    let _ = writeln!(out, "Report: {}", document.subtitle);

    for section in &document.sections {
        write_section(&mut out, section, 2);
    }

    out.push_str("\n---\n");
    for field in &document.footer {
        let _ = writeln!(out, "{}: {}", field.label, field.value);
    }
    out
}

fn write_section(out: &mut String, section: &Section, level: usize) {
    let _ = writeln!(out, "\n{} {}", "#".repeat(level), section.heading);
    if let Some(note) = &section.note {
        let _ = writeln!(out, "{note}");
    }
    if let Some(block) = &section.content {
        write_block(out, block, level);
    }
    for subsection in &section.subsections {
        write_section(out, subsection, level + 1);
    }
}

fn write_block(out: &mut String, block: &Block, level: usize) {
    match block {
        Block::Fields(fields) => {
            for field in fields {
                let _ = writeln!(out, "{}: {}", field.label, field.value);
            }
        }
        Block::List { items, placeholder } => {
            if items.is_empty() {
                let _ = writeln!(out, "{placeholder}");
            }
            for item in items {
                let _ = writeln!(out, "- {item}");
            }
        }
        Block::Text(text) => {
            let _ = writeln!(out, "{text}");
        }
        Block::Table(table) => write_table(out, table, level + 1),
    }
}

/// Each row becomes a sub-heading named by its first column, followed by
/// `Label: value` lines for the remaining columns
fn write_table(out: &mut String, table: &Table, level: usize) {
    if table.rows.is_empty() {
        let _ = writeln!(out, "{}", table.empty_message);
        return;
    }
    for row in &table.rows {
        let mut cells = table.columns.iter().zip(row);
        if let Some((_, name)) = cells.next() {
            let _ = writeln!(out, "\n{} {name}", "#".repeat(level));
        }
        for (label, value) in cells {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
}
