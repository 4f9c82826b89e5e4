//! Declaration extractors
//!
//! Tree-sitter based extraction of PHP type metadata.
//!
//! # Architecture
//!
//! - `base` - per-file source access shared by the visitor and evaluator
//! - `declarations` - accumulator returned per file and merged by the engine
//! - `php` - the class / interface / trait visitor and expression evaluator

pub mod base;
pub mod declarations;
pub mod php;

pub use base::BaseExtractor;
pub use declarations::Declarations;
pub use php::{ClassVisitor, MAGIC_METHODS, METHOD_FINAL_MIRRORS_ABSTRACT};
