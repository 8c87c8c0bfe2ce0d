/*
 * Go Import Extractor
 *
 * Extracts import metadata from a Go import_declaration:
 * - import "path/to/pkg"
 * - import alias "path/to/pkg"
 * - import ( ... ) groups
 *
 * Blank (`_`) and dot (`.`) imports carry no usable short name and are
 * recorded without one.
 */

use rustc_hash::FxHashMap;
use tree_sitter::Node;

use crate::shared::models::Span;
use crate::shared::utils::tree_sitter::{extract_node_text, node_to_span};

/// Import metadata extracted from AST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Unquoted import path (e.g., "framework/common/net_fw")
    pub path: String,

    /// Explicit alias, if written
    pub alias: Option<String>,

    /// Source location
    pub span: Span,
}

impl ImportInfo {
    /// Name the package is referred to by inside the file
    pub fn short_name(&self) -> Option<&str> {
        match self.alias.as_deref() {
            Some("_") | Some(".") => None,
            Some(alias) => Some(alias),
            None => self.path.rsplit('/').next().filter(|s| !s.is_empty()),
        }
    }
}

/// Extract all import specs of an import_declaration, in source order
pub fn extract_import_declaration(node: &Node, source: &str) -> Vec<ImportInfo> {
    let mut imports = Vec::new();
    if node.kind() != "import_declaration" {
        return imports;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "import_spec" => imports.extend(extract_import_spec(&child, source)),
            "import_spec_list" => {
                let mut spec_cursor = child.walk();
                for spec in child.children(&mut spec_cursor) {
                    if spec.kind() == "import_spec" {
                        imports.extend(extract_import_spec(&spec, source));
                    }
                }
            }
            _ => {}
        }
    }

    imports
}

fn extract_import_spec(node: &Node, source: &str) -> Option<ImportInfo> {
    let path_node = node.child_by_field_name("path")?;
    let path = extract_node_text(&path_node, source)
        .trim_matches(|c| c == '"' || c == '`')
        .to_string();
    let alias = node
        .child_by_field_name("name")
        .map(|n| extract_node_text(&n, source).to_string());

    Some(ImportInfo {
        path,
        alias,
        span: node_to_span(node),
    })
}

/// Short name → import path, for resolving `pkg.Type` references.
///
/// On collision the last import seen wins.
#[derive(Debug, Clone, Default)]
pub struct ImportAliases {
    aliases: FxHashMap<String, String>,
}

impl ImportAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, import: &ImportInfo) {
        if let Some(short) = import.short_name() {
            self.aliases.insert(short.to_string(), import.path.clone());
        }
    }

    pub fn resolve(&self, short_name: &str) -> Option<&str> {
        self.aliases.get(short_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
