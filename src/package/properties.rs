//! Auxiliary package parts: core properties and relationships.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Metadata;

/// A single entry of a relationship part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship id (`rId1`, ...)
    pub id: String,

    /// Relationship type URI
    pub rel_type: String,

    /// Relationship target (part path or external URI)
    pub target: String,

    /// Whether the target lies outside the package
    pub external: bool,
}

/// Parse `docProps/core.xml`.
pub(crate) fn parse_core_properties(xml: &str) -> Result<Metadata> {
    let mut reader = Reader::from_str(xml);
    let mut meta = Metadata::default();
    let mut current: Option<Vec<u8>> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => current = Some(e.local_name().as_ref().to_vec()),
            Event::End(_) => current = None,
            Event::Text(t) => {
                let Some(ref element) = current else { continue };
                let text = t
                    .unescape()
                    .map_err(|e| Error::MalformedContent(e.to_string()))?;
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                match element.as_slice() {
                    b"title" => meta.title = Some(text.to_string()),
                    b"subject" => meta.subject = Some(text.to_string()),
                    b"creator" => meta.creator = Some(text.to_string()),
                    b"keywords" => meta.keywords = Some(text.to_string()),
                    b"description" => meta.description = Some(text.to_string()),
                    b"lastModifiedBy" => meta.last_modified_by = Some(text.to_string()),
                    b"revision" => meta.revision = Some(text.to_string()),
                    b"created" => meta.created = parse_w3cdtf(text),
                    b"modified" => meta.modified = parse_w3cdtf(text),
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(meta)
}

/// Parse a relationship part (`word/_rels/document.xml.rels`).
pub(crate) fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    let mut rels = Vec::new();

    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(e) | Event::Empty(e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut id = None;
                let mut rel_type = None;
                let mut target = None;
                let mut external = false;
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| Error::MalformedContent(e.to_string()))?;
                    let value = attr
                        .unescape_value()
                        .map_err(|e| Error::MalformedContent(e.to_string()))?;
                    match attr.key.local_name().as_ref() {
                        b"Id" => id = Some(value.into_owned()),
                        b"Type" => rel_type = Some(value.into_owned()),
                        b"Target" => target = Some(value.into_owned()),
                        b"TargetMode" => external = value.as_ref() == "External",
                        _ => {}
                    }
                }
                if let (Some(id), Some(rel_type), Some(target)) = (id, rel_type, target) {
                    rels.push(Relationship {
                        id,
                        rel_type,
                        target,
                        external,
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(rels)
}

/// Parse a W3CDTF timestamp: full RFC 3339, naive date-time, or bare date.
fn parse_w3cdtf(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
