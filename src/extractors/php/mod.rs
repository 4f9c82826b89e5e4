// PHP declaration visitor
//
// Walks one file's syntax tree and builds class, interface and trait models:
// - namespaces.rs: top-level statement walk and namespace tracking
// - types.rs: class / interface / trait declarations
// - members.rs: constant, property and method declarations
// - expressions.rs: literal-expression evaluator for constant and default values
// - helpers.rs: modifier parsing and name lookup

mod expressions;
mod helpers;
mod members;
mod namespaces;
mod types;

use crate::extractors::base::BaseExtractor;
use crate::extractors::declarations::Declarations;
use crate::model::ResolvedValue;
use std::path::PathBuf;
use tree_sitter::{Node, Tree};

pub use members::{MAGIC_METHODS, METHOD_FINAL_MIRRORS_ABSTRACT};

/// Visitor for a single PHP file.
///
/// One visitor per file: `visit` returns that file's declarations and the
/// caller merges them, so no state is shared between files.
pub struct ClassVisitor {
    base: BaseExtractor,
}

impl ClassVisitor {
    pub fn new(file_path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            base: BaseExtractor::new(file_path, content),
        }
    }

    /// Collect the namespaced classes, interfaces and traits declared in `tree`.
    pub fn visit(&self, tree: &Tree) -> Declarations {
        let mut declarations = Declarations::new();
        namespaces::visit_program(self, tree.root_node(), &mut declarations);

        tracing::debug!(
            "Visited {}: {} classes, {} interfaces, {} traits",
            self.base.file_path.display(),
            declarations.classes.len(),
            declarations.interfaces.len(),
            declarations.traits.len()
        );
        declarations
    }

    /// Statically evaluate an expression node from this file.
    pub fn evaluate(&self, node: Node) -> ResolvedValue {
        expressions::evaluate(self, node)
    }

    pub(super) fn get_base(&self) -> &BaseExtractor {
        &self.base
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::ClassVisitor;
    use crate::extractors::declarations::Declarations;
    use crate::language::{parse_php, php_parser};
    use std::path::Path;

    /// Parse `source` and visit it as `test.php`.
    pub fn visit_source(source: &str) -> Declarations {
        let mut parser = php_parser().unwrap();
        let tree = parse_php(&mut parser, Path::new("test.php"), source).unwrap();
        ClassVisitor::new("test.php", source).visit(&tree)
    }
}
