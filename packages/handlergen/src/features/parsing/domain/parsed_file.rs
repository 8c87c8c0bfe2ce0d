//! Parsed source file
//!
//! A syntactically valid Go file: source text plus its tree-sitter tree.

use tree_sitter::Tree;

#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// Path relative to the input root, `/`-separated
    pub filename: String,

    pub source: String,

    pub tree: Tree,
}

impl ParsedFile {
    pub fn new(filename: impl Into<String>, source: impl Into<String>, tree: Tree) -> Self {
        Self {
            filename: filename.into(),
            source: source.into(),
            tree,
        }
    }

    /// Check if file is empty
    pub fn is_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}
