//! Extraction engine
//!
//! Scans a directory, parses every matching file, visits it with its own
//! `ClassVisitor` and merges the per-file declarations. A file that cannot
//! be read or parsed produces a diagnostic and is skipped; the run goes on.

use crate::config::ExtractorConfig;
use crate::error::{ExtractorError, Result};
use crate::extractors::{ClassVisitor, Declarations};
use crate::language::{parse_php, php_parser};
use crate::model::{
    ClassInformation, ClassModel, Information, InterfaceInformation, InterfaceModel,
    TraitInformation, TraitModel, TypeModel,
};
use crate::scanner::scan;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tree_sitter::Parser;

/// A file that was skipped, with the reason.
///
/// `line` and `column` are 1-based; both are 0 when the failure has no
/// source position (e.g. the file could not be read).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostic {
    pub path: PathBuf,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl FileDiagnostic {
    fn from_error(path: &Path, error: ExtractorError) -> Self {
        match error {
            ExtractorError::Parse {
                path,
                message,
                line,
                column,
            } => Self {
                path,
                message,
                line,
                column,
            },
            other => Self {
                path: path.to_path_buf(),
                message: other.to_string(),
                line: 0,
                column: 0,
            },
        }
    }
}

impl fmt::Display for FileDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(
                f,
                "{} in {} on line {}, column {}",
                self.message,
                self.path.display(),
                self.line,
                self.column
            )
        } else {
            write!(f, "{}: {}", self.path.display(), self.message)
        }
    }
}

/// Extracts type metadata from every PHP file below a directory
#[derive(Debug, Clone)]
pub struct DirectoryInformation {
    root: PathBuf,
    config: ExtractorConfig,
}

impl DirectoryInformation {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, ExtractorConfig::default())
    }

    pub fn with_config(root: impl Into<PathBuf>, config: ExtractorConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Scan, parse and visit every matching file.
    ///
    /// Only a bad root or an unloadable grammar fail the whole run; per-file
    /// problems end up in [`Extraction::diagnostics`].
    pub fn collect(&self) -> Result<Extraction> {
        let files = scan(&self.root, &self.config)?;
        // Load the grammar once up front so a broken grammar fails fast.
        let mut parser = php_parser()?;

        info!(
            "Extracting PHP declarations from {} (parallel: {})",
            self.root.display(),
            self.config.parallel
        );

        let outcomes: Vec<FileOutcome> = if self.config.parallel {
            let paths: Vec<PathBuf> = files.collect();
            paths
                .par_iter()
                .map_init(php_parser, |parser, path| match parser {
                    Ok(parser) => visit_file(parser, path),
                    Err(e) => Err(FileDiagnostic::from_error(path, clone_language_error(e))),
                })
                .collect()
        } else {
            files.map(|path| visit_file(&mut parser, &path)).collect()
        };

        let files_scanned = outcomes.len();
        let mut declarations = Declarations::new();
        let mut diagnostics = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(file_declarations) => declarations.merge(file_declarations),
                Err(diagnostic) => {
                    warn!("{}", diagnostic);
                    diagnostics.push(diagnostic);
                }
            }
        }

        let extraction = Extraction::from_declarations(declarations, diagnostics, files_scanned);
        info!(
            "Extracted {} classes, {} interfaces, {} traits from {} files ({} skipped)",
            extraction.classes.len(),
            extraction.interfaces.len(),
            extraction.traits.len(),
            files_scanned,
            extraction.diagnostics.len()
        );
        Ok(extraction)
    }
}

type FileOutcome = std::result::Result<Declarations, FileDiagnostic>;

fn visit_file(parser: &mut Parser, path: &Path) -> FileOutcome {
    debug!("Visiting {}", path.display());

    let bytes = fs::read(path)
        .map_err(|e| FileDiagnostic::from_error(path, ExtractorError::io(path, e)))?;
    let content = String::from_utf8_lossy(&bytes).into_owned();

    let tree = parse_php(parser, path, &content)
        .map_err(|e| FileDiagnostic::from_error(path, e))?;

    Ok(ClassVisitor::new(path, content).visit(&tree))
}

fn clone_language_error(error: &ExtractorError) -> ExtractorError {
    ExtractorError::Language(error.to_string())
}

/// Result of a directory extraction
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    declarations: Declarations,
    classes: BTreeMap<String, ClassModel>,
    interfaces: BTreeMap<String, InterfaceModel>,
    traits: BTreeMap<String, TraitModel>,
    diagnostics: Vec<FileDiagnostic>,
    files_scanned: usize,
}

impl Extraction {
    /// Key merged declarations by fully-qualified name; a later declaration
    /// of the same name replaces the earlier one.
    pub fn from_declarations(
        declarations: Declarations,
        diagnostics: Vec<FileDiagnostic>,
        files_scanned: usize,
    ) -> Self {
        let classes = by_name(&declarations.classes);
        let interfaces = by_name(&declarations.interfaces);
        let traits = by_name(&declarations.traits);

        Self {
            declarations,
            classes,
            interfaces,
            traits,
            diagnostics,
            files_scanned,
        }
    }

    /// Every class in visit order, duplicates included
    pub fn class_models(&self) -> &[ClassModel] {
        &self.declarations.classes
    }

    pub fn interface_models(&self) -> &[InterfaceModel] {
        &self.declarations.interfaces
    }

    pub fn trait_models(&self) -> &[TraitModel] {
        &self.declarations.traits
    }

    pub fn classes(&self) -> &BTreeMap<String, ClassModel> {
        &self.classes
    }

    pub fn interfaces(&self) -> &BTreeMap<String, InterfaceModel> {
        &self.interfaces
    }

    pub fn traits(&self) -> &BTreeMap<String, TraitModel> {
        &self.traits
    }

    pub fn class(&self, fully_qualified_name: &str) -> Option<&ClassModel> {
        self.classes.get(fully_qualified_name)
    }

    pub fn interface(&self, fully_qualified_name: &str) -> Option<&InterfaceModel> {
        self.interfaces.get(fully_qualified_name)
    }

    pub fn trait_model(&self, fully_qualified_name: &str) -> Option<&TraitModel> {
        self.traits.get(fully_qualified_name)
    }

    pub fn class_information(&self) -> BTreeMap<String, ClassInformation> {
        self.classes
            .iter()
            .map(|(name, class)| (name.clone(), class.information()))
            .collect()
    }

    pub fn interface_information(&self) -> BTreeMap<String, InterfaceInformation> {
        self.interfaces
            .iter()
            .map(|(name, interface)| (name.clone(), interface.information()))
            .collect()
    }

    pub fn trait_information(&self) -> BTreeMap<String, TraitInformation> {
        self.traits
            .iter()
            .map(|(name, trait_model)| (name.clone(), trait_model.information()))
            .collect()
    }

    pub fn information(&self) -> Information {
        Information {
            classes: self.class_information(),
            interfaces: self.interface_information(),
            traits: self.trait_information(),
        }
    }

    /// Files that were skipped because they could not be read or parsed
    pub fn diagnostics(&self) -> &[FileDiagnostic] {
        &self.diagnostics
    }

    /// Number of files visited or skipped
    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    /// Names of non-private properties, unique, in first-seen order
    /// (classes, then traits, each by fully-qualified name).
    pub fn public_property_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let class_properties = self.classes.values().flat_map(|class| class.properties());
        let trait_properties = self
            .traits
            .values()
            .flat_map(|trait_model| trait_model.properties());

        class_properties
            .chain(trait_properties)
            .filter(|property| !property.is_private())
            .filter(|property| seen.insert(property.name().to_string()))
            .map(|property| property.name().to_string())
            .collect()
    }

    /// blake3 digest of the JSON information tree, stable across runs over
    /// unchanged sources.
    pub fn fingerprint(&self) -> Result<String> {
        let json = serde_json::to_string(&self.information())?;
        Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
    }
}

fn by_name<T: TypeModel + Clone>(models: &[T]) -> BTreeMap<String, T> {
    let mut map = BTreeMap::new();
    for model in models {
        map.insert(model.fully_qualified_name(), model.clone());
    }
    map
}
