//! Merged archive output.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::Result;
use crate::package::DocumentPackage;

/// Produce a new package from `main` with its primary content part
/// replaced by `document_xml`.
///
/// Every other entry is raw-copied in archive order, so untouched parts
/// (styles, headers, footers, media, relationships) keep their original
/// bytes and compression.
pub(crate) fn rebuild_package(main: &DocumentPackage, document_xml: &str) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(main.as_bytes()))?;
    let capacity = main.size() + document_xml.len();
    let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(capacity)));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for i in 0..archive.len() {
        let file = archive.by_index_raw(i)?;
        if file.name() == main.main_part() {
            drop(file);
            writer.start_file(main.main_part(), options)?;
            writer.write_all(document_xml.as_bytes())?;
        } else {
            writer.raw_copy_file(file)?;
        }
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}
