// Base extractor shared by language visitors
//
// - extractor.rs: source text access and tree navigation helpers

pub mod extractor;

pub use extractor::BaseExtractor;
