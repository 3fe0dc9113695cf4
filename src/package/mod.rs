//! Document package reading.
//!
//! A [`DocumentPackage`] is a validated, immutable DOCX container: the raw
//! ZIP bytes plus the resolved primary content part. Part contents are
//! decompressed on access; the package itself is never mutated.

mod archive;
mod body;
mod properties;

pub use archive::DocumentPackage;
pub use body::parse_body;
pub use properties::Relationship;

pub(crate) use archive::resolve_main_part;
