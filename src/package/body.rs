//! Primary content part parsing.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};
use crate::model::{BodyNode, DocumentBody};

/// Parse a primary content part into a [`DocumentBody`].
///
/// Walks the XML once, splitting the immediate children of `<w:body>`
/// into nodes by byte span. Node text is taken verbatim from the input,
/// so an unmodified body serializes back identically.
///
/// # Errors
///
/// [`Error::MalformedContent`] when the XML is not well-formed or no
/// body element exists.
pub fn parse_body(xml: &str) -> Result<DocumentBody> {
    let mut reader = Reader::from_str(xml);
    let mut nodes = Vec::new();
    let mut in_body = false;
    let mut content_start = None;
    let mut content_end = None;

    loop {
        let pos = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(e) => {
                if in_body {
                    reader.read_to_end(e.name())?;
                    let end = reader.buffer_position() as usize;
                    nodes.push(BodyNode::from_xml(&xml[pos..end]));
                } else if e.local_name().as_ref() == b"body" {
                    in_body = true;
                    content_start = Some(reader.buffer_position() as usize);
                }
            }
            Event::Empty(e) => {
                if in_body {
                    let end = reader.buffer_position() as usize;
                    nodes.push(BodyNode::from_xml(&xml[pos..end]));
                } else if e.local_name().as_ref() == b"body" {
                    return Err(Error::MalformedContent(
                        "document body is empty".into(),
                    ));
                }
            }
            Event::End(e) => {
                if in_body && e.local_name().as_ref() == b"body" {
                    content_end = Some(pos);
                    in_body = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match (content_start, content_end) {
        (Some(start), Some(end)) => Ok(DocumentBody {
            prolog: xml[..start].to_string(),
            nodes,
            epilog: xml[end..].to_string(),
        }),
        _ => Err(Error::MalformedContent(
            "no body element found in content part".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    const PREFIX: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#;
    const SUFFIX: &str = "</w:body></w:document>";

    fn doc(children: &str) -> String {
        format!("{PREFIX}{children}{SUFFIX}")
    }

    #[test]
    fn test_parse_simple_body() {
        let xml = doc("<w:p><w:r><w:t>Agreement Body</w:t></w:r></w:p><w:sectPr/>");
        let body = parse_body(&xml).unwrap();
        assert_eq!(body.node_count(), 2);
        assert_eq!(body.nodes[0].kind, NodeKind::Paragraph);
        assert_eq!(body.nodes[1].kind, NodeKind::SectionProps);
    }

    #[test]
    fn test_parse_nested_tables() {
        let xml = doc(
            "<w:tbl><w:tr><w:tc><w:tbl><w:tr><w:tc/></w:tr></w:tbl></w:tc></w:tr></w:tbl>\
             <w:p/><w:sectPr/>",
        );
        let body = parse_body(&xml).unwrap();
        assert_eq!(body.node_count(), 3);
        assert_eq!(body.nodes[0].kind, NodeKind::Table);
    }

    #[test]
    fn test_round_trip_is_identity() {
        let xml = doc(
            r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t xml:space="preserve"> spaced </w:t></w:r></w:p><w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>"#,
        );
        let body = parse_body(&xml).unwrap();
        assert_eq!(body.serialize(), xml);
    }

    #[test]
    fn test_sect_pr_inside_paragraph_stays_in_paragraph() {
        // mid-document section breaks live inside w:pPr and are not body children
        let xml = doc("<w:p><w:pPr><w:sectPr/></w:pPr></w:p><w:p/><w:sectPr/>");
        let body = parse_body(&xml).unwrap();
        assert_eq!(body.section_props_count(), 1);
        assert_eq!(body.nodes[0].kind, NodeKind::Paragraph);
    }

    #[test]
    fn test_no_body_element() {
        let xml = r#"<?xml version="1.0"?><w:document xmlns:w="ns"><w:other/></w:document>"#;
        let result = parse_body(xml);
        assert!(matches!(result, Err(Error::MalformedContent(_))));
    }

    #[test]
    fn test_empty_body_element() {
        let xml = r#"<w:document xmlns:w="ns"><w:body/></w:document>"#;
        let result = parse_body(xml);
        assert!(matches!(result, Err(Error::MalformedContent(_))));
    }

    #[test]
    fn test_malformed_xml() {
        let xml = doc("<w:p><w:r>");
        let result = parse_body(&xml);
        assert!(result.is_err());
    }

    #[test]
    fn test_body_with_only_sect_pr() {
        let xml = doc("<w:sectPr/>");
        let body = parse_body(&xml).unwrap();
        assert_eq!(body.node_count(), 1);
        assert_eq!(body.insertion_point(), 0);
    }
}
