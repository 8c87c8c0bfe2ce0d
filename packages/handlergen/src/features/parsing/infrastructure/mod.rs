//! Parsing infrastructure - external dependencies

pub mod extractors;
pub mod source_walker;
pub mod tree_sitter;

pub use source_walker::{SourceFile, SourceWalker};
pub use tree_sitter::TreeSitterParser;
