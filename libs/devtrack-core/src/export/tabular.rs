//! CSV rendering
//!
//! The core entity is one header row plus one value row holding every scalar,
//! list and narrative field. Each itemized collection follows as its own block:
//! a label row, a header row, then one row per item. List values are joined
//! with `", "` inside a single quoted cell.

use crate::error::{Result, TrackerError};
use crate::export::document::{Block, ReportDocument, Section, Table};
use csv::{QuoteStyle, WriterBuilder};

/// Render a document as CSV bytes
///
/// # Errors
/// Returns `TrackerError::Csv` or `TrackerError::Io` if the writer fails
pub fn render(document: &ReportDocument) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    let mut header: Vec<String> = vec!["Title".to_string(), "Report".to_string()];
    let mut values: Vec<String> = vec![document.title.clone(), document.subtitle.to_string()];
    let mut tables: Vec<(&Section, &Table)> = Vec::new();
    for section in &document.sections {
        flatten(section, &mut header, &mut values, &mut tables);
    }

    writer.write_record(&header)?;
    writer.write_record(&values)?;

    for (section, table) in tables {
        let mut label = vec![section.heading];
        if let Some(note) = &section.note {
            label.push(note.as_str());
        }
        writer.write_record(&label)?;
        writer.write_record(&table.columns)?;
        if table.rows.is_empty() {
            writer.write_record([table.empty_message])?;
        }
        for row in &table.rows {
            writer.write_record(row)?;
        }
    }

    writer.write_record(["Generated"])?;
    writer.write_record(document.footer.iter().map(|f| f.label))?;
    writer.write_record(document.footer.iter().map(|f| f.value.as_str()))?;

    writer
        .into_inner()
        .map_err(|e| TrackerError::Io(e.into_error()))
}

/// Collect a section's scalar content into the entity row and defer its tables
fn flatten<'a>(
    section: &'a Section,
    header: &mut Vec<String>,
    values: &mut Vec<String>,
    tables: &mut Vec<(&'a Section, &'a Table)>,
) {
    match &section.content {
        Some(Block::Fields(fields)) => {
            for field in fields {
                header.push(field.label.to_string());
                values.push(field.value.clone());
            }
        }
        Some(Block::List { items, placeholder }) => {
            header.push(section.heading.to_string());
            values.push(if items.is_empty() {
                (*placeholder).to_string()
            } else {
                items.join(", ")
            });
        }
        Some(Block::Text(text)) => {
            header.push(section.heading.to_string());
            values.push(text.clone());
        }
        Some(Block::Table(table)) => tables.push((section, table)),
        None => {}
    }
    for subsection in &section.subsections {
        flatten(subsection, header, values, tables);
    }
}
