//! Hierarchical XML document rendering
//!
//! Headings carry their level (1 for the title, 2 for sections, 3 for
//! subsections). Itemized collections become `<table>` elements with a fixed
//! `<header>` row.

use crate::error::{Result, TrackerError};
use crate::export::document::{Block, Field, ReportDocument, Section, Table};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.inner.write_event(event).map_err(TrackerError::xml)
    }

    fn open(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attribute in attributes {
            start.push_attribute(*attribute);
        }
        self.event(Event::Start(start))
    }

    fn close(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn element(&mut self, name: &str, attributes: &[(&str, &str)], text: &str) -> Result<()> {
        self.open(name, attributes)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

/// Render a document as XML bytes
///
/// # Errors
/// Returns `TrackerError::Xml` if the writer fails
pub fn render(document: &ReportDocument) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new();
    xml.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.open("document", &[("type", document.entity_type)])?;

    xml.element("heading", &[("level", "1")], &document.title)?;
    xml.element("subtitle", &[], document.subtitle)?;

    for section in &document.sections {
        write_section(&mut xml, section, 2)?;
    }

    xml.open("footer", &[])?;
    write_fields(&mut xml, &document.footer)?;
    xml.close("footer")?;

    xml.close("document")?;
    Ok(xml.into_bytes())
}

fn write_section(xml: &mut XmlWriter, section: &Section, level: u8) -> Result<()> {
    let level_attr = level.to_string();
    xml.open("section", &[])?;
    xml.element("heading", &[("level", level_attr.as_str())], section.heading)?;
    if let Some(note) = &section.note {
        xml.element("paragraph", &[], note)?;
    }
    match &section.content {
        Some(Block::Fields(fields)) => write_fields(xml, fields)?,
        Some(Block::List { items, placeholder }) => {
            if items.is_empty() {
                xml.element("paragraph", &[], placeholder)?;
            } else {
                xml.open("list", &[])?;
                for item in items {
                    xml.element("item", &[], item)?;
                }
                xml.close("list")?;
            }
        }
        Some(Block::Text(text)) => xml.element("paragraph", &[], text)?,
        Some(Block::Table(table)) => write_table(xml, table)?,
        None => {}
    }
    for subsection in &section.subsections {
        write_section(xml, subsection, level + 1)?;
    }
    xml.close("section")
}

fn write_fields(xml: &mut XmlWriter, fields: &[Field]) -> Result<()> {
    for field in fields {
        xml.element("field", &[("label", field.label)], &field.value)?;
    }
    Ok(())
}

fn write_table(xml: &mut XmlWriter, table: &Table) -> Result<()> {
    if table.rows.is_empty() {
        return xml.element("paragraph", &[], table.empty_message);
    }
    xml.open("table", &[])?;
    xml.open("header", &[])?;
    for column in &table.columns {
        xml.element("cell", &[], column)?;
    }
    xml.close("header")?;
    for row in &table.rows {
        xml.open("row", &[])?;
        for cell in row {
            xml.element("cell", &[], cell)?;
        }
        xml.close("row")?;
    }
    xml.close("table")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{build_document, ExportConfig};
    use crate::models::ReportPayload;
    use crate::test_utils::{create_full_log_payload, create_full_project_payload, mock_date};
    use chrono::NaiveTime;

    fn render_payload(payload: &ReportPayload) -> String {
        let at = mock_date(2026, 10, 16).and_time(NaiveTime::MIN).and_utc();
        let bytes = render(&build_document(payload, &ExportConfig::default(), at).unwrap()).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_document_skeleton() {
        let xml = render_payload(&create_full_project_payload());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<document type=\"project\">"));
        assert!(xml.contains("<heading level=\"1\">Boiler Feed Pump Upgrade</heading>"));
        assert!(xml.contains("<heading level=\"2\">Overview</heading>"));
        assert!(xml.contains("<heading level=\"3\">Objective</heading>"));
        assert!(xml.trim_end().ends_with("</document>"));
    }

    #[test]
    fn test_fields_and_tables() {
        let xml = render_payload(&create_full_project_payload());
        assert!(xml.contains("<field label=\"System\">Boiler House</field>"));
        assert!(xml.contains("<cell>Factory Acceptance Test</cell>"));
        assert!(xml.contains("<cell>Due Date</cell>"));
        assert!(xml.contains("<item>Long lead time on drives</item>"));
        assert!(xml.contains("<paragraph>This entry contains 2 attachment(s)</paragraph>"));
        assert!(xml.contains("<field label=\"Generated By\">Dana Reyes</field>"));
    }

    #[test]
    fn test_section_order() {
        let xml = render_payload(&create_full_log_payload());
        let position = |needle: &str| xml.find(needle).unwrap();
        assert!(position(">Overview<") < position(">Tags<"));
        assert!(position(">Tags<") < position(">Details<"));
        assert!(position(">Details<") < position(">Attachments<"));
        assert!(position(">Attachments<") < position("<footer>"));
        assert!(!xml.contains(">Milestones<"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut payload = create_full_log_payload();
        if let ReportPayload::TechnicalLog(report) = &mut payload {
            report.log.title = "Pump A & B <trip>".to_string();
        }
        let xml = render_payload(&payload);
        assert!(xml.contains("Pump A &amp; B &lt;trip&gt;"));
    }
}
