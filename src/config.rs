//! Extraction configuration

use crate::language::DEFAULT_EXTENSION;

/// Configuration for scanning and extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// File extension to scan, without the leading dot
    pub extension: String,
    /// Visit files on the rayon thread pool
    pub parallel: bool,
    /// Honour `.classdumpignore` in the scan root
    pub use_ignore_file: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            parallel: false,
            use_ignore_file: true,
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan files with `extension` instead of `php` (a leading dot is ignored).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_ignore_file(mut self, use_ignore_file: bool) -> Self {
        self.use_ignore_file = use_ignore_file;
        self
    }
}
