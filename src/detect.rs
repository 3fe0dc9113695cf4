//! DOCX format detection and validation.

use crate::error::{Error, Result};
use crate::package::resolve_main_part;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

/// DOCX format information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxFormat {
    /// Path of the primary content part inside the archive
    pub main_part: String,
}

impl std::fmt::Display for DocxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DOCX ({})", self.main_part)
    }
}

/// ZIP local file header magic: PK\x03\x04
pub(crate) const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect DOCX format from a file path.
///
/// # Arguments
/// * `path` - Path to the file
///
/// # Returns
/// * `Ok(DocxFormat)` if the file is a word-processing package
/// * `Err(Error::UnknownFormat)` if the file is not a ZIP archive
/// * `Err(Error::MalformedPackage)` if the archive has no word-processing
///   content part
///
/// # Example
/// ```no_run
/// use docxmerge::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("agreement.docx").unwrap();
/// println!("content part: {}", format.main_part);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocxFormat> {
    let data = fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Detect DOCX format from bytes.
///
/// # Arguments
/// * `data` - The complete package bytes (the ZIP central directory sits
///   at the end of the file, so a header prefix is not enough)
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocxFormat> {
    if data.len() < ZIP_MAGIC.len() || !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let main_part = resolve_main_part(&mut archive)?;

    Ok(DocxFormat { main_part })
}

/// Check if a file is a word-processing package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes represent a word-processing package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in parts {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_detect_valid_docx() {
        let data = build_zip(&[("word/document.xml", "<w:document/>")]);
        let format = detect_format_from_bytes(&data).unwrap();
        assert_eq!(format.main_part, "word/document.xml");
        assert_eq!(format.to_string(), "DOCX (word/document.xml)");
    }

    #[test]
    fn test_detect_not_a_zip() {
        let result = detect_format_from_bytes(b"<!DOCTYPE html><html></html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_empty_data() {
        let data: [u8; 0] = [];
        let result = detect_format_from_bytes(&data);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_too_short() {
        let result = detect_format_from_bytes(b"PK");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_zip_without_content_part() {
        let data = build_zip(&[("readme.txt", "not a docx")]);
        let result = detect_format_from_bytes(&data);
        assert!(matches!(result, Err(Error::MalformedPackage(_))));
    }

    #[test]
    fn test_is_docx_bytes() {
        let data = build_zip(&[("word/document.xml", "<w:document/>")]);
        assert!(is_docx_bytes(&data));
        assert!(!is_docx_bytes(b"Not a package"));
        assert!(!is_docx_bytes(b""));
    }
}
