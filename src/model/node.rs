//! Block-level body node types.

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The page-break marker paragraph inserted between merged documents.
const PAGE_BREAK_XML: &str = r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#;

static PAGE_BREAK_RE: OnceLock<Regex> = OnceLock::new();

fn page_break_re() -> &'static Regex {
    PAGE_BREAK_RE.get_or_init(|| {
        Regex::new(r#"<w:br\b[^>]*w:type\s*=\s*["']page["']"#).expect("valid page break pattern")
    })
}

/// Classification of a block-level node in a document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A text paragraph
    Paragraph,

    /// A table
    Table,

    /// A paragraph containing a forced page break
    PageBreak,

    /// The section-properties node defining page layout
    SectionProps,

    /// Any other block-level content (bookmarks, structured tags, ...)
    Other,
}

/// A single block-level node of a document body.
///
/// The node owns its serialized form. Moving a node between documents
/// copies the XML text, never a live reference into the source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyNode {
    /// Node classification
    pub kind: NodeKind,

    /// Verbatim serialized XML of the node
    pub xml: String,
}

impl BodyNode {
    /// Create a node from its serialized XML, classifying it by element name.
    pub fn from_xml(xml: impl Into<String>) -> Self {
        let xml = xml.into();
        let kind = classify(&xml);
        Self { kind, xml }
    }

    /// Create the forced page-break marker paragraph.
    pub fn page_break() -> Self {
        Self {
            kind: NodeKind::PageBreak,
            xml: PAGE_BREAK_XML.to_string(),
        }
    }

    /// Check if this node is a section-properties node.
    pub fn is_section_props(&self) -> bool {
        self.kind == NodeKind::SectionProps
    }

    /// Check if this node carries a forced page break.
    pub fn is_page_break(&self) -> bool {
        self.kind == NodeKind::PageBreak
    }

    /// Extract the visible text of the node (`w:t` runs, concatenated).
    pub fn plain_text(&self) -> String {
        let mut reader = Reader::from_str(&self.xml);
        let mut out = String::new();
        let mut text_depth = 0usize;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => text_depth += 1,
                Ok(Event::End(e)) if e.local_name().as_ref() == b"t" => {
                    text_depth = text_depth.saturating_sub(1);
                }
                Ok(Event::Text(t)) if text_depth > 0 => {
                    if let Ok(s) = t.unescape() {
                        out.push_str(&s);
                    }
                }
                Ok(Event::Eof) | Err(_) => break,
                _ => {}
            }
        }
        out
    }
}

/// Classify a serialized node by its outermost element name.
fn classify(xml: &str) -> NodeKind {
    match element_local_name(xml) {
        "p" => {
            if page_break_re().is_match(xml) {
                NodeKind::PageBreak
            } else {
                NodeKind::Paragraph
            }
        }
        "tbl" => NodeKind::Table,
        "sectPr" => NodeKind::SectionProps,
        _ => NodeKind::Other,
    }
}

/// Local name of the first element in a serialized fragment.
fn element_local_name(xml: &str) -> &str {
    let start = match xml.find('<') {
        Some(i) => i + 1,
        None => return "",
    };
    let rest = &xml[start..];
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(rest.len());
    let name = &rest[..end];
    name.rsplit(':').next().unwrap_or(name)
}
