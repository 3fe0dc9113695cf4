//! Merge statistics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Statistics collected while assembling a merged package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Exhibits merged into the output
    pub exhibits_merged: u32,

    /// Exhibits skipped in lenient mode
    pub exhibits_skipped: u32,

    /// Page-break markers inserted by the assembler
    pub page_breaks_inserted: u32,

    /// Exhibit body nodes copied into the output
    pub nodes_copied: u32,

    /// Exhibit body nodes dropped under the unsupported-part policy
    pub nodes_dropped: u32,

    /// Exhibit section-properties nodes discarded
    pub section_props_discarded: u32,
}

impl MergeStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &MergeStats) {
        self.exhibits_merged += other.exhibits_merged;
        self.exhibits_skipped += other.exhibits_skipped;
        self.page_breaks_inserted += other.page_breaks_inserted;
        self.nodes_copied += other.nodes_copied;
        self.nodes_dropped += other.nodes_dropped;
        self.section_props_discarded += other.section_props_discarded;
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Other(e.to_string()))
    }
}
