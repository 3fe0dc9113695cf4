//! The document assembler.

use std::sync::OnceLock;

use rayon::prelude::*;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{BodyNode, DocumentBody};
use crate::package::{parse_body, DocumentPackage, Relationship};
use crate::writer::rebuild_package;

use super::options::{ErrorMode, MergeOptions, UnsupportedPartPolicy};
use super::stats::MergeStats;

static MEDIA_REF_RE: OnceLock<Regex> = OnceLock::new();

/// Relationship references to package-local binaries (images, OLE
/// objects). Hyperlink `r:id` references are deliberately not matched;
/// a dangling hyperlink degrades, a dangling image corrupts.
fn media_ref_re() -> &'static Regex {
    MEDIA_REF_RE.get_or_init(|| {
        Regex::new(r#"r:(?:embed|link)\s*=\s*["']([^"']+)["']"#).expect("valid media ref pattern")
    })
}

/// Result of an assembly: the merged package and what was done to
/// produce it.
#[derive(Debug, Clone)]
pub struct Assembled {
    /// The merged document package
    pub package: DocumentPackage,

    /// Merge statistics
    pub stats: MergeStats,
}

impl Assembled {
    /// The merged package bytes.
    pub fn bytes(&self) -> &[u8] {
        self.package.as_bytes()
    }

    /// Consume the result, returning the merged package.
    pub fn into_package(self) -> DocumentPackage {
        self.package
    }
}

/// Assembles a main document package with its exhibit packages.
///
/// The output renders the main content first, then each exhibit after a
/// forced page break, in call order. Only the main package's
/// section-properties node survives; every non-content part of the main
/// package is carried through untouched.
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: MergeOptions,
}

impl Assembler {
    /// Create an assembler with the given options.
    pub fn new(options: MergeOptions) -> Self {
        Self { options }
    }

    /// The assembler's options.
    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge `main` with `exhibits`, in order.
    ///
    /// With no exhibits the main package is returned unchanged,
    /// byte-for-byte. Main-package failures are always fatal; exhibit
    /// failures follow [`ErrorMode`].
    pub fn assemble(
        &self,
        main: &DocumentPackage,
        exhibits: &[DocumentPackage],
    ) -> Result<Assembled> {
        if exhibits.is_empty() {
            return Ok(Assembled {
                package: main.clone(),
                stats: MergeStats::default(),
            });
        }

        let main_xml = main.main_document_xml()?;
        let mut body = parse_body(&main_xml)?;

        let parsed = self.parse_exhibit_bodies(exhibits);

        let mut stats = MergeStats::new();
        let mut merged: Vec<BodyNode> = Vec::new();

        for (index, result) in parsed.into_iter().enumerate() {
            match result {
                Ok(exhibit_body) => {
                    self.merge_exhibit(index, exhibit_body, &exhibits[index], &mut merged, &mut stats)?;
                }
                Err(e) => match self.options.error_mode {
                    ErrorMode::Strict => return Err(e.for_exhibit(index)),
                    ErrorMode::Lenient => {
                        log::warn!("skipping exhibit {}: {}", index + 1, e);
                        stats.exhibits_skipped += 1;
                    }
                },
            }
        }

        let insert_at = body.insertion_point();
        body.nodes.splice(insert_at..insert_at, merged);

        let package = DocumentPackage::from_bytes(rebuild_package(main, &body.serialize())?)?;

        Ok(Assembled { package, stats })
    }

    /// Parse every exhibit's body, optionally in parallel. Output order
    /// is always the input order.
    fn parse_exhibit_bodies(&self, exhibits: &[DocumentPackage]) -> Vec<Result<DocumentBody>> {
        let parse = |pkg: &DocumentPackage| pkg.main_document_xml().and_then(|xml| parse_body(&xml));
        if self.options.parallel && exhibits.len() > 1 {
            exhibits.par_iter().map(parse).collect()
        } else {
            exhibits.iter().map(parse).collect()
        }
    }

    /// Append one exhibit's content: a page-break marker, then every
    /// body node except section properties.
    fn merge_exhibit(
        &self,
        index: usize,
        exhibit_body: DocumentBody,
        exhibit: &DocumentPackage,
        merged: &mut Vec<BodyNode>,
        stats: &mut MergeStats,
    ) -> Result<()> {
        merged.push(BodyNode::page_break());
        stats.page_breaks_inserted += 1;

        let mut relationships: Option<Vec<Relationship>> = None;

        for node in exhibit_body.nodes {
            if node.is_section_props() {
                stats.section_props_discarded += 1;
                continue;
            }

            let refs = local_media_refs(&node.xml, &mut relationships, exhibit);
            if !refs.is_empty() {
                match self.options.unsupported_parts {
                    UnsupportedPartPolicy::Skip => {
                        log::warn!(
                            "exhibit {}: dropping {:?} node referencing package-local media: {}",
                            index + 1,
                            node.kind,
                            refs.join(", ")
                        );
                        stats.nodes_dropped += 1;
                        continue;
                    }
                    UnsupportedPartPolicy::Fail => {
                        return Err(Error::UnsupportedPart(format!(
                            "exhibit {}: content references package-local media ({})",
                            index + 1,
                            refs.join(", ")
                        )));
                    }
                }
            }

            merged.push(node);
            stats.nodes_copied += 1;
        }

        stats.exhibits_merged += 1;
        Ok(())
    }
}

/// Relationship ids a node references that resolve to parts inside the
/// exhibit's own archive. External-target references pass through; they
/// stay valid in any package.
fn local_media_refs(
    xml: &str,
    relationships: &mut Option<Vec<Relationship>>,
    exhibit: &DocumentPackage,
) -> Vec<String> {
    let mut refs: Vec<String> = media_ref_re()
        .captures_iter(xml)
        .map(|c| c[1].to_string())
        .collect();
    if refs.is_empty() {
        return refs;
    }

    let rels = relationships.get_or_insert_with(|| {
        exhibit.relationships().unwrap_or_else(|e| {
            log::warn!("unreadable relationship part, treating references as local: {e}");
            Vec::new()
        })
    });

    refs.retain(|id| !rels.iter().any(|r| r.id == *id && r.external));
    refs.dedup();
    refs
}

/// Merge a main package with exhibits using default options.
///
/// Convenience wrapper over [`Assembler`]; returns the merged package
/// without statistics.
pub fn assemble(main: &DocumentPackage, exhibits: &[DocumentPackage]) -> Result<DocumentPackage> {
    Assembler::new(MergeOptions::default())
        .assemble(main, exhibits)
        .map(|a| a.package)
}
