//! Body model types for WordprocessingML content.
//!
//! This module defines the intermediate representation that bridges
//! package reading and archive writing. A parsed primary content part
//! becomes a [`DocumentBody`]: an ordered list of block-level nodes,
//! each carrying its verbatim XML, so untouched content round-trips
//! byte-for-byte.

mod body;
mod metadata;
mod node;

pub use body::DocumentBody;
pub use metadata::Metadata;
pub use node::{BodyNode, NodeKind};
