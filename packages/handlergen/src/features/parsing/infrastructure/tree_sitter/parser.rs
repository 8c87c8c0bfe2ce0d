//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter dependency lives.

use tree_sitter::Parser as TSParser;

use crate::features::parsing::domain::ParsedFile;
use crate::features::parsing::ports::SourceParser;
use crate::shared::models::{HandlergenError, Result};
use crate::shared::utils::tree_sitter::{first_error_node, node_to_span};

/// Tree-sitter based Go parser
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeSitterParser;

impl TreeSitterParser {
    pub fn go() -> Self {
        Self
    }

    fn get_ts_language(&self) -> tree_sitter::Language {
        tree_sitter_go::language()
    }
}

impl SourceParser for TreeSitterParser {
    fn parse(&self, source: &str, filename: &str) -> Result<ParsedFile> {
        let mut parser = TSParser::new();
        parser.set_language(&self.get_ts_language()).map_err(|e| {
            HandlergenError::parse(format!("Failed to set language: {}", e)).with_file(filename)
        })?;

        let tree = parser.parse(source, None).ok_or_else(|| {
            HandlergenError::parse("Failed to parse source code").with_file(filename)
        })?;

        let root = tree.root_node();
        if root.has_error() {
            let (line, message) = match first_error_node(&root) {
                Some(node) => {
                    let span = node_to_span(&node);
                    let what = if node.is_missing() {
                        format!("missing {}", node.kind())
                    } else {
                        "unexpected syntax".to_string()
                    };
                    (span.start_line, format!("{} at column {}", what, span.start_col + 1))
                }
                None => (1, "syntax error".to_string()),
            };
            return Err(HandlergenError::parse(message)
                .with_file(filename)
                .with_line(line));
        }

        Ok(ParsedFile::new(filename, source, tree))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext == "go"
    }

    fn language_name(&self) -> &'static str {
        "go"
    }
}
