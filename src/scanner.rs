//! Directory scanner
//!
//! Lazily yields every file below a root whose extension matches the
//! configured one. Depth is unbounded; directories are walked by `glob`.

use crate::config::ExtractorConfig;
use crate::error::{ExtractorError, Result};
use crate::utils::ignore::{is_ignored_by_pattern, load_ignore_patterns};
use glob::{MatchOptions, Pattern};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Lazy iterator over the absolute paths of matching files
pub struct ScannedFiles {
    paths: glob::Paths,
    root: PathBuf,
    extension: String,
    ignore_patterns: Vec<String>,
}

impl ScannedFiles {
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl Iterator for ScannedFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let path = match self.paths.next()? {
                Ok(path) => path,
                Err(e) => {
                    warn!("Skipping unreadable path {}: {}", e.path().display(), e.error());
                    continue;
                }
            };

            if !path.is_file() || path.extension() != Some(OsStr::new(&self.extension)) {
                continue;
            }
            // Patterns apply below the scan root only
            let relative = path.strip_prefix(&self.root).unwrap_or(path.as_path());
            if is_ignored_by_pattern(relative, &self.ignore_patterns) {
                debug!("Ignoring {}", path.display());
                continue;
            }
            return Some(path);
        }
    }
}

/// Scan `root` for files with the configured extension.
///
/// Fails with [`ExtractorError::ScanPath`] when `root` does not exist or is
/// not a directory. Nothing is read until the iterator is advanced.
pub fn scan(root: &Path, config: &ExtractorConfig) -> Result<ScannedFiles> {
    if !root.is_dir() {
        return Err(ExtractorError::ScanPath {
            path: root.to_path_buf(),
        });
    }

    let root = root
        .canonicalize()
        .map_err(|e| ExtractorError::io(root, e))?;

    let ignore_patterns = if config.use_ignore_file {
        load_ignore_patterns(&root)?
    } else {
        Vec::new()
    };

    let pattern = format!(
        "{}/**/*.{}",
        Pattern::escape(&root.to_string_lossy()),
        Pattern::escape(&config.extension)
    );
    debug!("Scanning with pattern {}", pattern);

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };
    let paths = glob::glob_with(&pattern, options).map_err(|e| ExtractorError::ScanPath {
        path: PathBuf::from(format!("{} ({})", root.display(), e.msg)),
    })?;

    Ok(ScannedFiles {
        paths,
        root,
        extension: config.extension.clone(),
        ignore_patterns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn relative_names(root: &Path, files: ScannedFiles) -> Vec<String> {
        let root = root.canonicalize().unwrap();
        let mut names: Vec<String> = files
            .map(|path| {
                path.strip_prefix(&root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_scan_finds_nested_files_with_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src/Models/Deep")).unwrap();
        fs::write(root.join("index.php"), "<?php").unwrap();
        fs::write(root.join("src/Models/User.php"), "<?php").unwrap();
        fs::write(root.join("src/Models/Deep/Thing.php"), "<?php").unwrap();
        fs::write(root.join("src/readme.md"), "# docs").unwrap();
        fs::write(root.join("src/template.phtml"), "<?php").unwrap();

        let files = scan(root, &ExtractorConfig::default()).unwrap();
        assert_eq!(
            relative_names(root, files),
            vec!["index.php", "src/Models/Deep/Thing.php", "src/Models/User.php"]
        );
    }

    #[test]
    fn test_scan_yields_absolute_paths() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.php"), "<?php").unwrap();

        let files: Vec<_> = scan(temp_dir.path(), &ExtractorConfig::default())
            .unwrap()
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].is_absolute());
    }

    #[test]
    fn test_scan_custom_extension() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.php"), "<?php").unwrap();
        fs::write(root.join("b.inc"), "<?php").unwrap();

        let config = ExtractorConfig::new().with_extension("inc");
        let files = scan(root, &config).unwrap();
        assert_eq!(files.extension(), "inc");
        assert_eq!(relative_names(root, files), vec!["b.inc"]);
    }

    #[test]
    fn test_scan_honours_ignore_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("vendor/acme")).unwrap();
        fs::write(root.join("vendor/acme/Lib.php"), "<?php").unwrap();
        fs::write(root.join("App.php"), "<?php").unwrap();
        fs::write(root.join(".classdumpignore"), "vendor/\n").unwrap();

        let files = scan(root, &ExtractorConfig::default()).unwrap();
        assert_eq!(relative_names(root, files), vec!["App.php"]);

        let config = ExtractorConfig::default().with_ignore_file(false);
        let files = scan(root, &config).unwrap();
        assert_eq!(
            relative_names(root, files),
            vec!["App.php", "vendor/acme/Lib.php"]
        );
    }

    #[test]
    fn test_ignore_patterns_do_not_match_above_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("vendor/proj");
        fs::create_dir_all(root.join("Legacy")).unwrap();
        fs::write(root.join("A.php"), "<?php").unwrap();
        fs::write(root.join("Legacy/Old.php"), "<?php").unwrap();
        fs::write(root.join(".classdumpignore"), "vendor/\nproj\nLegacy/\n").unwrap();

        let files = scan(&root, &ExtractorConfig::default()).unwrap();
        assert_eq!(relative_names(&root, files), vec!["A.php"]);
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let err = scan(&missing, &ExtractorConfig::default())
            .err()
            .expect("missing root should fail");
        assert!(matches!(err, ExtractorError::ScanPath { .. }));
    }

    #[test]
    fn test_scan_file_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.php");
        fs::write(&file, "<?php").unwrap();

        assert!(matches!(
            scan(&file, &ExtractorConfig::default()),
            Err(ExtractorError::ScanPath { .. })
        ));
    }
}
