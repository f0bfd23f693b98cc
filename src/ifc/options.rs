//! Options controlling how much validation happens at open.

/// Settings applied when a file is opened.
///
/// By default an open validates the header, the string table extent and the
/// directory, and nothing else; partitions are validated when first used.
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// Resolve the global scope during open, so that a file without usable
    /// declarations fails to open instead of failing on first access.
    pub verify_global_scope: bool,
    /// Check every scope descriptor (bounds and overlap) during open.
    pub validate_scopes: bool,
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verify_global_scope(mut self, enabled: bool) -> Self {
        self.verify_global_scope = enabled;
        self
    }

    pub fn validate_scopes(mut self, enabled: bool) -> Self {
        self.validate_scopes = enabled;
        self
    }

    /// All checks enabled.
    pub fn strict() -> Self {
        Self {
            verify_global_scope: true,
            validate_scopes: true,
        }
    }
}
