//! Go Language Plugin
//!
//! Implements DeclarationExtractor for Go source code.
//! Classifies top-level declarations into structs, interfaces, typedefs,
//! enums (typed const blocks) and operations (functions and methods).

use tree_sitter::Node as TSNode;

use crate::features::parsing::domain::{
    Enum, EnumLiteral, FileDeclarations, Interface, Operation, ParsedFile, Struct, Typedef,
};
use crate::features::parsing::infrastructure::extractors::{
    extract_import_declaration, extract_parameter_list, extract_result, extract_struct_fields,
    ImportAliases,
};
use crate::features::parsing::ports::DeclarationExtractor;
use crate::shared::models::{HandlergenError, Result};
use crate::shared::utils::tree_sitter::{
    extract_node_text, extract_node_text_owned, find_child_by_kind, preceding_comments,
};

/// Build constraints that exclude a file from extraction
const SKIPPED_BUILD_CONSTRAINTS: &[&str] = &["// +build !appengine", "//go:build !appengine"];

const BASIC_LITERALS: &[&str] = &[
    "interpreted_string_literal",
    "raw_string_literal",
    "int_literal",
    "float_literal",
    "imaginary_literal",
    "rune_literal",
];

/// Per-file extraction state
struct FileContext<'a> {
    source: &'a str,
    filename: &'a str,
    package_name: String,
    aliases: ImportAliases,
}

impl<'a> FileContext<'a> {
    fn text(&self, node: &TSNode) -> &'a str {
        extract_node_text(node, self.source)
    }
}

/// Go language plugin
#[derive(Debug, Default, Clone, Copy)]
pub struct GoPlugin;

impl GoPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Whether the file carries a build constraint that excludes it
    fn is_build_excluded(&self, root: &TSNode, source: &str) -> bool {
        let mut cursor = root.walk();
        let excluded = root.named_children(&mut cursor).any(|child| {
            child.kind() == "comment"
                && SKIPPED_BUILD_CONSTRAINTS.contains(&extract_node_text(&child, source).trim_end())
        });
        excluded
    }

    fn package_name(&self, root: &TSNode, file: &ParsedFile) -> Result<String> {
        find_child_by_kind(root, "package_clause")
            .and_then(|clause| find_child_by_kind(&clause, "package_identifier"))
            .map(|id| extract_node_text_owned(&id, &file.source))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| {
                HandlergenError::parse("missing package clause").with_file(file.filename.as_str())
            })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Type declarations
    // ═══════════════════════════════════════════════════════════════════════

    /// Extract type declaration (struct, interface, typedef)
    fn extract_type_decl(&self, ctx: &FileContext, node: &TSNode, out: &mut FileDeclarations) {
        let group_docs = preceding_comments(node, ctx.source);

        let mut cursor = node.walk();
        for spec in node.named_children(&mut cursor) {
            if !matches!(spec.kind(), "type_spec" | "type_alias") {
                continue;
            }
            let own_docs = preceding_comments(&spec, ctx.source);
            let doc_lines = if own_docs.is_empty() {
                group_docs.clone()
            } else {
                own_docs
            };
            self.extract_type_spec(ctx, &spec, doc_lines, out);
        }
    }

    fn extract_type_spec(
        &self,
        ctx: &FileContext,
        spec: &TSNode,
        doc_lines: Vec<String>,
        out: &mut FileDeclarations,
    ) {
        let Some(name) = spec.child_by_field_name("name").map(|n| ctx.text(&n).to_string()) else {
            return;
        };
        let Some(type_node) = spec.child_by_field_name("type") else {
            return;
        };

        let is_alias = spec.kind() == "type_alias";
        match type_node.kind() {
            "struct_type" if !is_alias => out.structs.push(Struct {
                name,
                package_name: ctx.package_name.clone(),
                filename: ctx.filename.to_string(),
                fields: extract_struct_fields(&type_node, ctx.source, &ctx.aliases),
                doc_lines,
                operations: Vec::new(),
            }),
            "interface_type" if !is_alias => out.interfaces.push(Interface {
                name,
                package_name: ctx.package_name.clone(),
                filename: ctx.filename.to_string(),
                doc_lines,
                methods: self.extract_interface_methods(ctx, &type_node),
            }),
            kind => {
                // Underlying type recorded only when it is a plain identifier
                let type_name = if kind == "type_identifier" {
                    ctx.text(&type_node).to_string()
                } else {
                    String::new()
                };
                out.typedefs.push(Typedef {
                    name,
                    package_name: ctx.package_name.clone(),
                    filename: ctx.filename.to_string(),
                    type_name,
                    doc_lines,
                });
            }
        }
    }

    /// Interface methods; embedded interfaces and type unions are skipped
    fn extract_interface_methods(&self, ctx: &FileContext, iface: &TSNode) -> Vec<Operation> {
        let mut methods = Vec::new();
        let mut elems = Vec::new();

        let mut cursor = iface.walk();
        for child in iface.named_children(&mut cursor) {
            if child.kind() == "method_spec_list" {
                let mut list_cursor = child.walk();
                elems.extend(child.named_children(&mut list_cursor));
            } else {
                elems.push(child);
            }
        }

        for elem in elems {
            if !matches!(elem.kind(), "method_elem" | "method_spec") {
                continue;
            }
            let Some(name) = elem.child_by_field_name("name") else {
                continue;
            };
            methods.push(Operation {
                package_name: ctx.package_name.clone(),
                filename: ctx.filename.to_string(),
                name: ctx.text(&name).to_string(),
                line: elem.start_position().row as u32 + 1,
                doc_lines: preceding_comments(&elem, ctx.source),
                input_args: elem
                    .child_by_field_name("parameters")
                    .map(|p| extract_parameter_list(&p, ctx.source, &ctx.aliases))
                    .unwrap_or_default(),
                output_args: elem
                    .child_by_field_name("result")
                    .map(|r| extract_result(&r, ctx.source, &ctx.aliases))
                    .unwrap_or_default(),
                related_struct: None,
            });
        }

        methods
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Functions and methods
    // ═══════════════════════════════════════════════════════════════════════

    /// Extract function or method declaration
    fn extract_operation(&self, ctx: &FileContext, node: &TSNode) -> Option<Operation> {
        let name = node.child_by_field_name("name").map(|n| ctx.text(&n).to_string())?;

        let related_struct = node
            .child_by_field_name("receiver")
            .and_then(|recv| extract_parameter_list(&recv, ctx.source, &ctx.aliases).into_iter().next());

        Some(Operation {
            package_name: ctx.package_name.clone(),
            filename: ctx.filename.to_string(),
            name,
            line: node.start_position().row as u32 + 1,
            doc_lines: preceding_comments(node, ctx.source),
            input_args: node
                .child_by_field_name("parameters")
                .map(|p| extract_parameter_list(&p, ctx.source, &ctx.aliases))
                .unwrap_or_default(),
            output_args: node
                .child_by_field_name("result")
                .map(|r| extract_result(&r, ctx.source, &ctx.aliases))
                .unwrap_or_default(),
            related_struct,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Enums
    // ═══════════════════════════════════════════════════════════════════════

    /// A const block is an enum when one of its specs names an explicit type.
    /// Doc lines are filled in later from the same-named typedef.
    fn extract_enum(&self, ctx: &FileContext, node: &TSNode) -> Option<Enum> {
        let mut cursor = node.walk();
        let specs: Vec<TSNode> = node
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "const_spec")
            .collect();

        let enum_type = specs.iter().find_map(|spec| {
            spec.child_by_field_name("type")
                .filter(|t| t.kind() == "type_identifier")
                .map(|t| ctx.text(&t).to_string())
        })?;

        let enum_literals = specs
            .iter()
            .filter_map(|spec| {
                let name = spec.child_by_field_name("name")?;
                Some(EnumLiteral {
                    name: ctx.text(&name).to_string(),
                    value: self.first_basic_literal(ctx, spec).unwrap_or_default(),
                })
            })
            .collect();

        Some(Enum {
            name: enum_type,
            package_name: ctx.package_name.clone(),
            filename: ctx.filename.to_string(),
            doc_lines: Vec::new(),
            enum_literals,
        })
    }

    fn first_basic_literal(&self, ctx: &FileContext, spec: &TSNode) -> Option<String> {
        let values = spec.child_by_field_name("value")?;
        let mut cursor = values.walk();
        let literal = values
            .named_children(&mut cursor)
            .find(|v| BASIC_LITERALS.contains(&v.kind()))?;
        Some(
            ctx.text(&literal)
                .trim_matches(|c| c == '"' || c == '`')
                .to_string(),
        )
    }
}

impl DeclarationExtractor for GoPlugin {
    fn extract(&self, file: &ParsedFile) -> Result<Option<FileDeclarations>> {
        let root = file.tree.root_node();
        if self.is_build_excluded(&root, &file.source) {
            return Ok(None);
        }

        let mut ctx = FileContext {
            source: &file.source,
            filename: &file.filename,
            package_name: self.package_name(&root, file)?,
            aliases: ImportAliases::new(),
        };
        let mut out = FileDeclarations {
            package_name: ctx.package_name.clone(),
            filename: file.filename.clone(),
            ..Default::default()
        };

        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "import_declaration" => {
                    for import in extract_import_declaration(&child, ctx.source) {
                        ctx.aliases.register(&import);
                    }
                }
                "type_declaration" => self.extract_type_decl(&ctx, &child, &mut out),
                "function_declaration" | "method_declaration" => {
                    if let Some(op) = self.extract_operation(&ctx, &child) {
                        out.operations.push(op);
                    }
                }
                "const_declaration" => {
                    if let Some(e) = self.extract_enum(&ctx, &child) {
                        out.enums.push(e);
                    }
                }
                _ => {}
            }
        }

        Ok(Some(out))
    }
}
