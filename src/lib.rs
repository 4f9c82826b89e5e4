// php-class-dumper - static PHP class metadata extraction
//
// Parses PHP sources with tree-sitter, never executing them, and builds a
// model of every namespaced class, interface and trait: constants, properties,
// methods and their modifier flags, with literal values folded statically.
//
// Pipeline: scanner -> parser -> ClassVisitor (one per file) -> merge ->
// Extraction (keyed by fully-qualified name) -> output format.

pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod extractors;
pub mod language;
pub mod model;
pub mod output;
pub mod scanner;
pub mod utils;

pub use cli::Cli;
pub use config::ExtractorConfig;
pub use directory::{DirectoryInformation, Extraction, FileDiagnostic};
pub use error::{ExtractorError, Result};
pub use extractors::{ClassVisitor, Declarations};
pub use model::{
    ClassModel, Flag, FlagSet, Information, InterfaceModel, ResolvedValue, TraitModel, TypeModel,
};
pub use output::OutputFormat;
pub use scanner::{scan, ScannedFiles};
