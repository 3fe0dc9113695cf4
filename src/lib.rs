//! # docxmerge
//!
//! Assemble a DOCX agreement and its exhibit documents into a single
//! package.
//!
//! This library merges one main word-processing document with an ordered
//! list of exhibit documents. The output renders the main content first,
//! then each exhibit after a forced page break; the main document's page
//! and section formatting governs the whole result.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docxmerge::merge_files;
//!
//! fn main() -> docxmerge::Result<()> {
//!     let merged = merge_files("agreement.docx", &["exhibit_a.docx", "exhibit_b.docx"])?;
//!     merged.write_to_file("agreement_merged.docx")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layout preservation**: only the main document's section properties
//!   survive; exhibits inherit its page size and margins
//! - **Order preservation**: exhibits appear in call order, each on a new
//!   page
//! - **No partial output**: a malformed input fails the whole call by
//!   default; lenient mode skips bad exhibits with a warning
//! - **Parallel parsing**: exhibit bodies parse on a Rayon pool
//! - **In-memory**: inputs are immutable byte buffers; the output is a
//!   fresh buffer

pub mod assemble;
pub mod detect;
pub mod error;
pub mod model;
pub mod package;

mod writer;

// Re-export commonly used types
pub use assemble::{
    assemble, Assembled, Assembler, ErrorMode, MergeOptions, MergeStats, UnsupportedPartPolicy,
};
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, is_docx, is_docx_bytes, DocxFormat,
};
pub use error::{Error, Result};
pub use model::{BodyNode, DocumentBody, Metadata, NodeKind};
pub use package::{parse_body, DocumentPackage, Relationship};

use std::path::Path;

/// Merge a main document file with exhibit files.
///
/// # Arguments
///
/// * `main` - Path to the main document
/// * `exhibits` - Exhibit paths, in the order they should appear
///
/// # Returns
///
/// A `Result` containing the merged [`DocumentPackage`] or an error.
///
/// # Example
///
/// ```no_run
/// use docxmerge::merge_files;
///
/// let merged = merge_files("agreement.docx", &["exhibit_a.docx"]).unwrap();
/// println!("{} bytes", merged.size());
/// ```
pub fn merge_files<P: AsRef<Path>>(main: P, exhibits: &[P]) -> Result<DocumentPackage> {
    merge_files_with_options(main, exhibits, MergeOptions::default()).map(|a| a.package)
}

/// Merge a main document file with exhibit files, with custom options.
///
/// # Example
///
/// ```no_run
/// use docxmerge::{merge_files_with_options, MergeOptions};
///
/// let options = MergeOptions::new().lenient();
/// let result = merge_files_with_options("agreement.docx", &["exhibit_a.docx"], options).unwrap();
/// println!("merged {} exhibits", result.stats.exhibits_merged);
/// ```
pub fn merge_files_with_options<P: AsRef<Path>>(
    main: P,
    exhibits: &[P],
    options: MergeOptions,
) -> Result<Assembled> {
    let main_pkg = DocumentPackage::from_path(main)?;
    let (exhibit_pkgs, skipped) = open_exhibits(
        exhibits.iter().map(|p| DocumentPackage::from_path(p)),
        &options,
    )?;
    run_assembly(&main_pkg, &exhibit_pkgs, skipped, options)
}

/// Merge a main document with exhibits, all given as bytes.
///
/// # Example
///
/// ```no_run
/// use docxmerge::merge_bytes;
///
/// let main = std::fs::read("agreement.docx").unwrap();
/// let exhibit = std::fs::read("exhibit_a.docx").unwrap();
/// let merged = merge_bytes(&main, &[&exhibit]).unwrap();
/// ```
pub fn merge_bytes(main: &[u8], exhibits: &[&[u8]]) -> Result<DocumentPackage> {
    merge_bytes_with_options(main, exhibits, MergeOptions::default()).map(|a| a.package)
}

/// Merge byte buffers with custom options.
pub fn merge_bytes_with_options(
    main: &[u8],
    exhibits: &[&[u8]],
    options: MergeOptions,
) -> Result<Assembled> {
    let main_pkg = DocumentPackage::from_bytes(main.to_vec())?;
    let (exhibit_pkgs, skipped) = open_exhibits(
        exhibits
            .iter()
            .map(|b| DocumentPackage::from_bytes(b.to_vec())),
        &options,
    )?;
    run_assembly(&main_pkg, &exhibit_pkgs, skipped, options)
}

/// Merge document files asynchronously.
///
/// Reads the inputs with `tokio::fs`; the transform itself is the same
/// synchronous, in-memory operation.
#[cfg(feature = "async")]
pub async fn merge_files_async<P: AsRef<Path>>(main: P, exhibits: &[P]) -> Result<DocumentPackage> {
    let main_bytes = tokio::fs::read(main.as_ref()).await?;
    let mut exhibit_bytes = Vec::with_capacity(exhibits.len());
    for path in exhibits {
        exhibit_bytes.push(tokio::fs::read(path.as_ref()).await?);
    }
    let refs: Vec<&[u8]> = exhibit_bytes.iter().map(|b| b.as_slice()).collect();
    merge_bytes(&main_bytes, &refs)
}

/// Open exhibit packages, honoring the error mode: strict aborts on the
/// first unopenable exhibit, lenient counts it as skipped.
fn open_exhibits(
    results: impl Iterator<Item = Result<DocumentPackage>>,
    options: &MergeOptions,
) -> Result<(Vec<DocumentPackage>, u32)> {
    let mut packages = Vec::new();
    let mut skipped = 0u32;
    for (index, result) in results.enumerate() {
        match result {
            Ok(pkg) => packages.push(pkg),
            Err(e) => match options.error_mode {
                ErrorMode::Strict => return Err(e.for_exhibit(index)),
                ErrorMode::Lenient => {
                    log::warn!("skipping exhibit {}: {}", index + 1, e);
                    skipped += 1;
                }
            },
        }
    }
    Ok((packages, skipped))
}

fn run_assembly(
    main: &DocumentPackage,
    exhibits: &[DocumentPackage],
    already_skipped: u32,
    options: MergeOptions,
) -> Result<Assembled> {
    let mut assembled = Assembler::new(options).assemble(main, exhibits)?;
    assembled.stats.exhibits_skipped += already_skipped;
    Ok(assembled)
}

/// Builder for merging document packages.
///
/// # Example
///
/// ```no_run
/// use docxmerge::Merger;
///
/// let result = Merger::new()
///     .lenient()
///     .sequential()
///     .merge_files("agreement.docx", &["exhibit_a.docx"])?;
/// result.package.write_to_file("merged.docx")?;
/// # Ok::<(), docxmerge::Error>(())
/// ```
pub struct Merger {
    options: MergeOptions,
}

impl Merger {
    /// Create a new merger builder.
    pub fn new() -> Self {
        Self {
            options: MergeOptions::default(),
        }
    }

    /// Skip malformed exhibits instead of aborting.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Disable parallel exhibit parsing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Fail when exhibit content references package-local media.
    pub fn fail_on_unsupported(mut self) -> Self {
        self.options = self.options.fail_on_unsupported();
        self
    }

    /// Use the given options wholesale.
    pub fn with_options(mut self, options: MergeOptions) -> Self {
        self.options = options;
        self
    }

    /// Merge document files.
    pub fn merge_files<P: AsRef<Path>>(&self, main: P, exhibits: &[P]) -> Result<Assembled> {
        merge_files_with_options(main, exhibits, self.options.clone())
    }

    /// Merge byte buffers.
    pub fn merge_bytes(&self, main: &[u8], exhibits: &[&[u8]]) -> Result<Assembled> {
        merge_bytes_with_options(main, exhibits, self.options.clone())
    }

    /// Merge already-opened packages.
    pub fn merge_packages(
        &self,
        main: &DocumentPackage,
        exhibits: &[DocumentPackage],
    ) -> Result<Assembled> {
        Assembler::new(self.options.clone()).assemble(main, exhibits)
    }
}

impl Default for Merger {
    fn default() -> Self {
        Self::new()
    }
}
