//! Package metadata from the core-properties part.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Core document properties (`docProps/core.xml`).
///
/// All fields are optional; a package without a core-properties part
/// yields the default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Document author
    pub creator: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Description / comments
    pub description: Option<String>,

    /// Last editor
    pub last_modified_by: Option<String>,

    /// Revision counter
    pub revision: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Check if no property is set.
    pub fn is_empty(&self) -> bool {
        self == &Metadata::default()
    }
}
