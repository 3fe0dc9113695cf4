//! Merge options and configuration.

/// Options for assembling a main document with its exhibits.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Error handling mode for individual exhibits
    pub error_mode: ErrorMode,

    /// Policy for exhibit content the assembler cannot carry
    pub unsupported_parts: UnsupportedPartPolicy,

    /// Whether to parse exhibit bodies in parallel
    pub parallel: bool,
}

impl MergeOptions {
    /// Create new merge options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip malformed exhibits instead of aborting).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the unsupported-part policy.
    pub fn with_unsupported_parts(mut self, policy: UnsupportedPartPolicy) -> Self {
        self.unsupported_parts = policy;
        self
    }

    /// Fail the merge when exhibit content references package-local media.
    pub fn fail_on_unsupported(mut self) -> Self {
        self.unsupported_parts = UnsupportedPartPolicy::Fail;
        self
    }

    /// Enable or disable parallel exhibit parsing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel exhibit parsing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            unsupported_parts: UnsupportedPartPolicy::Skip,
            parallel: true,
        }
    }
}

/// Error handling mode for individual exhibits.
///
/// Main-package failures are always fatal; this mode only governs
/// exhibit packages. The default aborts the whole merge, since silently
/// dropping an exhibit changes the contractual content of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// A malformed exhibit aborts the whole merge
    #[default]
    Strict,
    /// Malformed exhibits are skipped with a warning
    Lenient,
}

/// Policy for exhibit content referencing parts that cannot be carried
/// into the output package (embedded media living in the exhibit's own
/// archive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedPartPolicy {
    /// Drop the referencing node and log a warning
    #[default]
    Skip,
    /// Fail the merge
    Fail,
}
