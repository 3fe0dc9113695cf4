//! Parsed document body.

use super::{BodyNode, NodeKind};
use serde::{Deserialize, Serialize};

/// The parsed primary content part of a document package.
///
/// `prolog` holds everything up to and including the `<w:body>` open tag,
/// `epilog` everything from `</w:body>` onward. Both are kept verbatim so
/// serialization preserves the original document envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBody {
    /// XML before the first body child
    pub prolog: String,

    /// Block-level body children, in document order
    pub nodes: Vec<BodyNode>,

    /// XML from the body close tag onward
    pub epilog: String,
}

impl DocumentBody {
    /// Number of body nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of section-properties nodes among the body children.
    pub fn section_props_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_section_props()).count()
    }

    /// Number of paragraph nodes (page-break markers excluded).
    pub fn paragraph_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Paragraph)
            .count()
    }

    /// Number of table nodes.
    pub fn table_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Table)
            .count()
    }

    /// Number of forced page-break markers.
    pub fn page_break_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_page_break()).count()
    }

    /// Index at which merged content is spliced in: just before the
    /// trailing section-properties node, or at the end when the body
    /// carries none.
    pub fn insertion_point(&self) -> usize {
        match self.nodes.last() {
            Some(last) if last.is_section_props() => self.nodes.len() - 1,
            _ => self.nodes.len(),
        }
    }

    /// Check if the body has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize the body back into the content part's textual form.
    pub fn serialize(&self) -> String {
        let nodes_len: usize = self.nodes.iter().map(|n| n.xml.len()).sum();
        let mut out =
            String::with_capacity(self.prolog.len() + nodes_len + self.epilog.len());
        out.push_str(&self.prolog);
        for node in &self.nodes {
            out.push_str(&node.xml);
        }
        out.push_str(&self.epilog);
        out
    }

    /// Visible text of the whole body.
    pub fn plain_text(&self) -> String {
        self.nodes
            .iter()
            .map(|n| n.plain_text())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_with(nodes: Vec<BodyNode>) -> DocumentBody {
        DocumentBody {
            prolog: "<w:document><w:body>".to_string(),
            nodes,
            epilog: "</w:body></w:document>".to_string(),
        }
    }

    #[test]
    fn test_insertion_point_before_trailing_sect_pr() {
        let body = body_with(vec![
            BodyNode::from_xml("<w:p><w:r><w:t>A</w:t></w:r></w:p>"),
            BodyNode::from_xml("<w:sectPr/>"),
        ]);
        assert_eq!(body.insertion_point(), 1);
    }

    #[test]
    fn test_insertion_point_without_sect_pr() {
        let body = body_with(vec![BodyNode::from_xml("<w:p/>")]);
        assert_eq!(body.insertion_point(), 1);

        let empty = body_with(vec![]);
        assert_eq!(empty.insertion_point(), 0);
    }

    #[test]
    fn test_serialize_preserves_order() {
        let body = body_with(vec![
            BodyNode::from_xml("<w:p><w:r><w:t>one</w:t></w:r></w:p>"),
            BodyNode::from_xml("<w:p><w:r><w:t>two</w:t></w:r></w:p>"),
            BodyNode::from_xml("<w:sectPr/>"),
        ]);
        assert_eq!(
            body.serialize(),
            "<w:document><w:body><w:p><w:r><w:t>one</w:t></w:r></w:p>\
             <w:p><w:r><w:t>two</w:t></w:r></w:p><w:sectPr/></w:body></w:document>"
        );
    }

    #[test]
    fn test_counters() {
        let body = body_with(vec![
            BodyNode::from_xml("<w:p><w:r><w:t>text</w:t></w:r></w:p>"),
            BodyNode::page_break(),
            BodyNode::from_xml("<w:tbl/>"),
            BodyNode::from_xml("<w:sectPr/>"),
        ]);
        assert_eq!(body.node_count(), 4);
        assert_eq!(body.paragraph_count(), 1);
        assert_eq!(body.page_break_count(), 1);
        assert_eq!(body.table_count(), 1);
        assert_eq!(body.section_props_count(), 1);
    }

    #[test]
    fn test_plain_text_skips_empty_nodes() {
        let body = body_with(vec![
            BodyNode::from_xml("<w:p><w:r><w:t>first</w:t></w:r></w:p>"),
            BodyNode::page_break(),
            BodyNode::from_xml("<w:p><w:r><w:t>second</w:t></w:r></w:p>"),
        ]);
        assert_eq!(body.plain_text(), "first\n\nsecond");
    }
}
