//! Utilities for handling .classdumpignore file patterns
//!
//! The scanner loads these patterns once from the scan root and skips every
//! matching file before it is read.

use crate::error::{ExtractorError, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the ignore file looked up in the scan root.
pub const IGNORE_FILE_NAME: &str = ".classdumpignore";

/// Load ignore patterns from `.classdumpignore` in the scan root
///
/// Returns an empty vector when the file does not exist. Empty lines and
/// comments (lines starting with #) are skipped.
///
/// ```text
/// # .classdumpignore
/// vendor/
/// *.blade.php
/// Legacy
/// ```
pub fn load_ignore_patterns(root: &Path) -> Result<Vec<String>> {
    let ignore_file = root.join(IGNORE_FILE_NAME);

    if !ignore_file.is_file() {
        return Ok(Vec::new());
    }

    let content =
        fs::read_to_string(&ignore_file).map_err(|e| ExtractorError::io(&ignore_file, e))?;

    let patterns: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if !patterns.is_empty() {
        debug!(
            "Loaded {} ignore patterns from {}",
            patterns.len(),
            ignore_file.display()
        );
    }

    Ok(patterns)
}

/// Check whether a path matches any ignore pattern
///
/// - `dir/` matches a whole path component named `dir`
/// - `*.ext` matches the end of the path
/// - anything else matches a substring of the path
pub fn is_ignored_by_pattern(path: &Path, patterns: &[String]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    // Patterns use forward slashes on every platform
    let path_str = path.to_string_lossy().replace('\\', "/");

    patterns.iter().any(|pattern| {
        if let Some(dir_name) = pattern.strip_suffix('/') {
            let dir_name = dir_name.trim_matches('/');
            !dir_name.is_empty() && path_str.split('/').any(|component| component == dir_name)
        } else if let Some(suffix) = pattern.strip_prefix('*') {
            path_str.ends_with(suffix)
        } else {
            path_str.contains(pattern.as_str())
        }
    })
}
