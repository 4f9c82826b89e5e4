//! Error types and exit codes for php-class-dumper

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Main error type for extraction and output operations
#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Specified directory '{}' could not be found or is not a directory", path.display())]
    ScanPath { path: PathBuf },

    #[error("{message} in {} on line {line}, column {column}", path.display())]
    Parse {
        path: PathBuf,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Failed to read or write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load PHP grammar: {0}")]
    Language(String),

    #[error("Unsupported format specified '{0}'")]
    UnsupportedFormat(String),

    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit codes:
    /// - 1: Scan path / IO error
    /// - 2: Unsupported output format
    /// - 3: Parse failure or grammar load failure
    /// - 4: Serialization failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::ScanPath { .. } | Self::Io { .. } => ExitCode::from(1),
            Self::UnsupportedFormat(_) => ExitCode::from(2),
            Self::Parse { .. } | Self::Language(_) => ExitCode::from(3),
            Self::Json(_) => ExitCode::from(4),
        }
    }
}

/// Result type alias for php-class-dumper operations
pub type Result<T> = std::result::Result<T, ExtractorError>;
