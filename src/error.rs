//! Error types for the docxmerge library.

use std::io;
use thiserror::Error;

/// Result type alias for docxmerge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while assembling document packages.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The bytes are not recognized as a ZIP archive.
    #[error("Unknown file format: not a ZIP archive")]
    UnknownFormat,

    /// The archive cannot be opened or lacks a required part.
    #[error("Malformed package: {0}")]
    MalformedPackage(String),

    /// The archive is readable but the body structure is invalid.
    #[error("Malformed content: {0}")]
    MalformedContent(String),

    /// Content references a part the assembler cannot carry across packages.
    #[error("Unsupported part: {0}")]
    UnsupportedPart(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::MalformedPackage(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedContent(err.to_string())
    }
}

impl Error {
    /// Rewrap a per-exhibit failure so the caller can tell which exhibit
    /// was rejected. Indices are 1-based in messages.
    pub(crate) fn for_exhibit(self, index: usize) -> Error {
        match self {
            Error::UnknownFormat => {
                Error::MalformedPackage(format!("exhibit {}: not a ZIP archive", index + 1))
            }
            Error::MalformedPackage(msg) => {
                Error::MalformedPackage(format!("exhibit {}: {}", index + 1, msg))
            }
            Error::MalformedContent(msg) => {
                Error::MalformedContent(format!("exhibit {}: {}", index + 1, msg))
            }
            other => other,
        }
    }
}
