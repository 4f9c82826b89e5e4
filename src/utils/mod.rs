// Utilities shared by the scanner and the CLI

/// File ignore pattern utilities (.classdumpignore support)
pub mod ignore;
