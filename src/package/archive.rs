//! DOCX container access.

use std::fs;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::detect::ZIP_MAGIC;
use crate::error::{Error, Result};
use crate::model::Metadata;

use super::properties::{self, Relationship};

/// Content type of the word-processing primary content part.
const MAIN_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

/// Part holding core document properties.
const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// A validated, immutable in-memory DOCX package.
///
/// Construction verifies the bytes open as a ZIP archive and contain a
/// primary content part. All accessors operate on the original bytes;
/// nothing is mutated in place.
#[derive(Debug, Clone)]
pub struct DocumentPackage {
    data: Vec<u8>,
    part_names: Vec<String>,
    main_part: String,
}

impl DocumentPackage {
    /// Open a package from bytes.
    ///
    /// # Errors
    ///
    /// * [`Error::UnknownFormat`] when the bytes are not a ZIP archive
    /// * [`Error::MalformedPackage`] when the archive cannot be read or
    ///   lacks a word-processing content part
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if !data.starts_with(ZIP_MAGIC) {
            return Err(Error::UnknownFormat);
        }

        let mut archive = ZipArchive::new(Cursor::new(&data))?;

        let mut part_names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            part_names.push(archive.by_index_raw(i)?.name().to_string());
        }

        let main_part = resolve_main_part(&mut archive)?;

        Ok(Self {
            data,
            part_names,
            main_part,
        })
    }

    /// Open a package file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_bytes(fs::read(path)?)
    }

    /// Open a package from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Path of the primary content part (normally `word/document.xml`).
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    /// Names of all archive parts, in archive order.
    pub fn part_names(&self) -> &[String] {
        &self.part_names
    }

    /// Number of parts in the archive.
    pub fn part_count(&self) -> usize {
        self.part_names.len()
    }

    /// Check if a named part exists.
    pub fn has_part(&self, name: &str) -> bool {
        self.part_names.iter().any(|n| n == name)
    }

    /// Decompressed bytes of a named part.
    pub fn part(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = ZipArchive::new(Cursor::new(&self.data))?;
        let mut file = archive
            .by_name(name)
            .map_err(|_| Error::MalformedPackage(format!("missing part: {name}")))?;
        let mut buf = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// The primary content part as UTF-8 text.
    pub fn main_document_xml(&self) -> Result<String> {
        String::from_utf8(self.part(&self.main_part)?).map_err(|_| {
            Error::MalformedContent("primary content part is not valid UTF-8".into())
        })
    }

    /// Core document properties, or the default when the package has none.
    pub fn metadata(&self) -> Result<Metadata> {
        if !self.has_part(CORE_PROPERTIES_PART) {
            return Ok(Metadata::default());
        }
        let xml = String::from_utf8(self.part(CORE_PROPERTIES_PART)?)
            .map_err(|_| Error::MalformedContent("core properties are not valid UTF-8".into()))?;
        properties::parse_core_properties(&xml)
    }

    /// Relationships of the primary content part, or empty when the
    /// package carries no relationship part for it.
    pub fn relationships(&self) -> Result<Vec<Relationship>> {
        let rels_name = rels_part_name(&self.main_part);
        if !self.has_part(&rels_name) {
            return Ok(Vec::new());
        }
        let xml = String::from_utf8(self.part(&rels_name)?)
            .map_err(|_| Error::MalformedContent("relationship part is not valid UTF-8".into()))?;
        properties::parse_relationships(&xml)
    }

    /// The package bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the package, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Package size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Write the package bytes to a file.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, &self.data)?;
        Ok(())
    }
}

/// Resolve the primary content part of an open archive.
///
/// Consults the `[Content_Types].xml` override table first, then falls
/// back to the conventional `word/document.xml` path.
pub(crate) fn resolve_main_part<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String> {
    let content_types = {
        match archive.by_name("[Content_Types].xml") {
            Ok(mut file) => {
                let mut xml = String::new();
                file.read_to_string(&mut xml)?;
                Some(xml)
            }
            Err(_) => None,
        }
    };

    if let Some(xml) = content_types {
        if let Some(part) = main_part_from_content_types(&xml)? {
            if archive.by_name(&part).is_ok() {
                return Ok(part);
            }
            return Err(Error::MalformedPackage(format!(
                "declared content part is missing: {part}"
            )));
        }
    }

    if archive.by_name("word/document.xml").is_ok() {
        return Ok("word/document.xml".to_string());
    }

    Err(Error::MalformedPackage(
        "no word-processing content part found".into(),
    ))
}

/// Find the part declared with the word-processing main content type.
fn main_part_from_content_types(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    loop {
        let event = reader.read_event()?;
        match &event {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Override" => {
                let mut part_name = None;
                let mut content_type = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(|e| Error::MalformedContent(e.to_string()))?;
                    let value = attr
                        .unescape_value()
                        .map_err(|e| Error::MalformedContent(e.to_string()))?;
                    match attr.key.local_name().as_ref() {
                        b"PartName" => part_name = Some(value.into_owned()),
                        b"ContentType" => content_type = Some(value.into_owned()),
                        _ => {}
                    }
                }
                if content_type.as_deref() == Some(MAIN_CONTENT_TYPE) {
                    if let Some(name) = part_name {
                        return Ok(Some(name.trim_start_matches('/').to_string()));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(None)
}

/// Relationship part path for a given part (`word/document.xml` ->
/// `word/_rels/document.xml.rels`).
fn rels_part_name(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}
