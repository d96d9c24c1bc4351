//! ComicInfo payload parsing and field rewriting.
//!
//! Only the top-level fields the matcher needs are read. Rewrites work on
//! the event stream so every element this tool does not touch — ordering,
//! attributes, unknown tags — passes through unchanged.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

use crate::error::ArchiveError;

/// The cataloging source that populated a metadata payload.
///
/// Taggers leave a signature in the `Notes` field; anything unrecognized
/// is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataProvider {
    Metron,
    ComicVine,
    Unknown,
}

impl MetadataProvider {
    pub fn from_notes(notes: Option<&str>) -> Self {
        let Some(notes) = notes else {
            return Self::Unknown;
        };
        if notes.contains("Metron") {
            Self::Metron
        } else if notes.contains("ComicVine") || notes.contains("Comic Vine") {
            Self::ComicVine
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metron => "Metron",
            Self::ComicVine => "ComicVine",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MetadataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fields of one embedded metadata payload that matter for matching.
#[derive(Debug, Clone, Default)]
pub struct ComicInfoSheet {
    pub series: Option<String>,
    pub title: Option<String>,
    pub number: Option<String>,
    pub notes: Option<String>,
}

impl ComicInfoSheet {
    pub fn provider(&self) -> MetadataProvider {
        MetadataProvider::from_notes(self.notes.as_deref())
    }
}

/// A single field replacement for [`rewrite`]. An empty value blanks the
/// element; a tag not present in the document is inserted before the
/// closing root tag.
#[derive(Debug, Clone)]
pub struct FieldEdit {
    pub tag: String,
    pub value: String,
}

impl FieldEdit {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

/// Parse a ComicInfo payload, extracting the top-level matching fields.
pub fn parse(xml: &[u8]) -> Result<ComicInfoSheet, ArchiveError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut sheet = ComicInfoSheet::default();
    let mut depth = 0usize;
    let mut current_tag = String::new();
    let mut saw_root = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                depth += 1;
                if depth == 1 {
                    if tag != "ComicInfo" {
                        return Err(ArchiveError::malformed(format!(
                            "unexpected root element <{tag}>"
                        )));
                    }
                    saw_root = true;
                } else if depth == 2 {
                    current_tag = tag;
                }
            }
            Event::Text(ref e) => {
                if depth == 2 {
                    let text = e.unescape()?.to_string();
                    match current_tag.as_str() {
                        "Series" => sheet.series = Some(text),
                        "Title" => sheet.title = Some(text),
                        "Number" => sheet.number = Some(text),
                        "Notes" => sheet.notes = Some(text),
                        _ => {}
                    }
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth < 2 {
                    current_tag.clear();
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(ArchiveError::malformed("no ComicInfo root element"));
    }
    Ok(sheet)
}

/// Rewrite named top-level fields of a ComicInfo payload.
///
/// Every event outside the edited elements is passed through verbatim.
/// Edits whose tag never appears are appended just before the closing
/// root tag, so a payload without a `Title` element gains one.
pub fn rewrite(xml: &[u8], edits: &[FieldEdit]) -> Result<Vec<u8>, ArchiveError> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::new());

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut pending: Vec<&FieldEdit> = edits.iter().collect();
    // Name of the element currently being replaced; its original content
    // is dropped until the matching end tag.
    let mut replacing: Option<String> = None;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match event {
            Event::Eof => break,
            Event::Start(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                depth += 1;
                if replacing.is_some() {
                    // nested content of a replaced element: dropped
                } else {
                    let edit_pos = if depth == 2 {
                        pending.iter().position(|edit| edit.tag == tag)
                    } else {
                        None
                    };
                    match edit_pos {
                        Some(pos) => {
                            let edit = pending.remove(pos);
                            writer.write_event(Event::Start(e))?;
                            if !edit.value.is_empty() {
                                writer.write_event(Event::Text(BytesText::new(&edit.value)))?;
                            }
                            writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
                            replacing = Some(tag);
                        }
                        None => writer.write_event(Event::Start(e))?,
                    }
                }
            }
            Event::Empty(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if replacing.is_some() {
                    // dropped
                } else {
                    let edit_pos = if depth == 1 {
                        pending.iter().position(|edit| edit.tag == tag)
                    } else {
                        None
                    };
                    match edit_pos {
                        Some(pos) => {
                            let edit = pending.remove(pos);
                            write_element(&mut writer, &edit.tag, &edit.value)?;
                        }
                        None => writer.write_event(Event::Empty(e))?,
                    }
                }
            }
            Event::End(e) => {
                let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if let Some(ref name) = replacing {
                    if depth == 2 && *name == tag {
                        replacing = None;
                    }
                } else {
                    if depth == 1 {
                        // closing root tag: append edits for missing elements
                        for edit in &pending {
                            write_element(&mut writer, &edit.tag, &edit.value)?;
                        }
                        pending.clear();
                    }
                    writer.write_event(Event::End(e))?;
                }
                depth = depth.saturating_sub(1);
            }
            other => {
                if replacing.is_none() {
                    writer.write_event(other)?;
                }
            }
        }
        buf.clear();
    }

    Ok(writer.into_inner())
}

fn write_element(writer: &mut Writer<Vec<u8>>, tag: &str, value: &str) -> Result<(), ArchiveError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    if !value.is_empty() {
        writer.write_event(Event::Text(BytesText::new(value)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ComicInfo xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <Series>Civil War:</Series>
  <Title>Civil War:</Title>
  <Number>1</Number>
  <Year>2006</Year>
  <Notes>Tagged with MetronTagger-2.3.0 using info from Metron on 2023-01-01</Notes>
  <Pages>
    <Page Image="0" ImageSize="812100" />
  </Pages>
</ComicInfo>"#;

    #[test]
    fn parse_extracts_matching_fields() {
        let sheet = parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(sheet.series.as_deref(), Some("Civil War:"));
        assert_eq!(sheet.title.as_deref(), Some("Civil War:"));
        assert_eq!(sheet.number.as_deref(), Some("1"));
        assert_eq!(sheet.provider(), MetadataProvider::Metron);
    }

    #[test]
    fn parse_ignores_nested_elements() {
        // the <Page> attributes must not bleed into the sheet
        let sheet = parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(sheet.notes.as_deref().map(|n| n.contains("Metron")), Some(true));
    }

    #[test]
    fn parse_rejects_non_comicinfo_root() {
        let err = parse(b"<Book><Series>X</Series></Book>").unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedPayload(_)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse(b"not xml at all").is_err());
        assert!(parse(b"").is_err());
    }

    #[test]
    fn parse_handles_empty_number_element() {
        let xml = r#"<ComicInfo><Series>One Shot</Series><Number/></ComicInfo>"#;
        let sheet = parse(xml.as_bytes()).unwrap();
        assert_eq!(sheet.series.as_deref(), Some("One Shot"));
        assert_eq!(sheet.number, None);
    }

    #[test]
    fn rewrite_replaces_fields_in_place() {
        let edits = [
            FieldEdit::new("Series", "Civil War"),
            FieldEdit::new("Title", "Civil War"),
            FieldEdit::new("Number", ""),
        ];
        let out = rewrite(SAMPLE.as_bytes(), &edits).unwrap();
        let sheet = parse(&out).unwrap();
        assert_eq!(sheet.series.as_deref(), Some("Civil War"));
        assert_eq!(sheet.title.as_deref(), Some("Civil War"));
        assert_eq!(sheet.number, None);

        // untouched elements survive verbatim
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("<Year>2006</Year>"));
        assert!(text.contains(r#"<Page Image="0" ImageSize="812100" />"#));
        assert!(text.contains("MetronTagger-2.3.0"));
    }

    #[test]
    fn rewrite_inserts_missing_title() {
        let xml = r#"<ComicInfo><Series>Hawkeye</Series><Year>2012</Year></ComicInfo>"#;
        let out = rewrite(xml.as_bytes(), &[FieldEdit::new("Title", "Hawkeye")]).unwrap();
        let sheet = parse(&out).unwrap();
        assert_eq!(sheet.title.as_deref(), Some("Hawkeye"));
        assert_eq!(sheet.series.as_deref(), Some("Hawkeye"));
    }

    #[test]
    fn rewrite_replaces_empty_element() {
        let xml = r#"<ComicInfo><Series>X</Series><Number/></ComicInfo>"#;
        let out = rewrite(xml.as_bytes(), &[FieldEdit::new("Number", "3")]).unwrap();
        let sheet = parse(&out).unwrap();
        assert_eq!(sheet.number.as_deref(), Some("3"));
    }

    #[test]
    fn rewrite_escapes_replacement_text() {
        let xml = r#"<ComicInfo><Series>Old</Series></ComicInfo>"#;
        let out = rewrite(xml.as_bytes(), &[FieldEdit::new("Series", "Cloak & Dagger")]).unwrap();
        let text = String::from_utf8(out.clone()).unwrap();
        assert!(text.contains("Cloak &amp; Dagger"));
        let sheet = parse(&out).unwrap();
        assert_eq!(sheet.series.as_deref(), Some("Cloak & Dagger"));
    }

    #[test]
    fn rewrite_without_edits_is_passthrough() {
        let out = rewrite(SAMPLE.as_bytes(), &[]).unwrap();
        let before = parse(SAMPLE.as_bytes()).unwrap();
        let after = parse(&out).unwrap();
        assert_eq!(before.series, after.series);
        assert_eq!(before.number, after.number);
    }

    #[test]
    fn provider_detection() {
        assert_eq!(
            MetadataProvider::from_notes(Some("Tagged with MetronTagger")),
            MetadataProvider::Metron
        );
        assert_eq!(
            MetadataProvider::from_notes(Some("Scraped metadata from ComicVine")),
            MetadataProvider::ComicVine
        );
        assert_eq!(
            MetadataProvider::from_notes(Some("hand edited")),
            MetadataProvider::Unknown
        );
        assert_eq!(MetadataProvider::from_notes(None), MetadataProvider::Unknown);
    }
}
