/*
 * Go Field Extractor
 *
 * Turns Go field-like syntax into model Fields:
 * - struct field_declaration_list (named, multi-name and embedded fields)
 * - parameter_list (parameters, results, method receivers)
 * - bare result types (`func F() error`)
 *
 * Qualified types (`pkg.Type`) are resolved to their import path through the
 * file's import aliases.
 */

use tree_sitter::Node;

use super::import::ImportAliases;
use crate::features::parsing::domain::Field;
use crate::shared::utils::tree_sitter::{extract_node_text, extract_node_text_owned, preceding_comments};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct TypeShape {
    is_pointer: bool,
    is_slice: bool,
    is_map: bool,
    package_name: Option<String>,
}

fn analyze_type(node: &Node, source: &str, aliases: &ImportAliases) -> TypeShape {
    let mut shape = TypeShape::default();
    let mut current = Some(*node);

    while let Some(ty) = current {
        current = match ty.kind() {
            "pointer_type" => {
                shape.is_pointer = true;
                last_named_child(&ty)
            }
            "slice_type" | "array_type" => {
                shape.is_slice = true;
                ty.child_by_field_name("element")
            }
            "map_type" => {
                shape.is_map = true;
                None
            }
            "parenthesized_type" => last_named_child(&ty),
            "generic_type" => ty.child_by_field_name("type"),
            "qualified_type" => {
                shape.package_name = ty
                    .child_by_field_name("package")
                    .and_then(|pkg| aliases.resolve(extract_node_text(&pkg, source)))
                    .map(str::to_string);
                None
            }
            _ => None,
        };
    }

    shape
}

fn last_named_child<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    let count = node.named_child_count();
    if count == 0 {
        None
    } else {
        node.named_child(count - 1)
    }
}

fn build_field(name: String, type_name: String, shape: TypeShape) -> Field {
    Field {
        name,
        type_name,
        package_name: shape.package_name,
        is_pointer: shape.is_pointer,
        is_slice: shape.is_slice,
        is_map: shape.is_map,
        tag: None,
        doc_lines: Vec::new(),
    }
}

/// Extract fields from a parameter_list (parameters, results, receivers)
pub fn extract_parameter_list(list: &Node, source: &str, aliases: &ImportAliases) -> Vec<Field> {
    let mut fields = Vec::new();
    let mut cursor = list.walk();

    for param in list.named_children(&mut cursor) {
        match param.kind() {
            "parameter_declaration" => {
                let Some(type_node) = param.child_by_field_name("type") else {
                    continue;
                };
                let type_name = extract_node_text_owned(&type_node, source);
                let shape = analyze_type(&type_node, source, aliases);

                let mut name_cursor = param.walk();
                let names: Vec<String> = param
                    .children_by_field_name("name", &mut name_cursor)
                    .map(|n| extract_node_text_owned(&n, source))
                    .collect();

                if names.is_empty() {
                    fields.push(build_field(String::new(), type_name, shape));
                } else {
                    for name in names {
                        fields.push(build_field(name, type_name.clone(), shape.clone()));
                    }
                }
            }
            "variadic_parameter_declaration" => {
                let Some(type_node) = param.child_by_field_name("type") else {
                    continue;
                };
                let name = param
                    .child_by_field_name("name")
                    .map(|n| extract_node_text_owned(&n, source))
                    .unwrap_or_default();
                let mut shape = analyze_type(&type_node, source, aliases);
                shape.is_slice = true;
                let type_name = format!("...{}", extract_node_text(&type_node, source));
                fields.push(build_field(name, type_name, shape));
            }
            _ => {}
        }
    }

    fields
}

/// Extract a function result: either a parameter_list or a single bare type
pub fn extract_result(result: &Node, source: &str, aliases: &ImportAliases) -> Vec<Field> {
    if result.kind() == "parameter_list" {
        return extract_parameter_list(result, source, aliases);
    }
    let shape = analyze_type(result, source, aliases);
    vec![build_field(
        String::new(),
        extract_node_text_owned(result, source),
        shape,
    )]
}

/// Extract fields from a struct_type node
pub fn extract_struct_fields(struct_type: &Node, source: &str, aliases: &ImportAliases) -> Vec<Field> {
    let mut fields = Vec::new();
    let mut cursor = struct_type.walk();

    for list in struct_type.named_children(&mut cursor) {
        if list.kind() != "field_declaration_list" {
            continue;
        }
        let mut list_cursor = list.walk();
        for decl in list.named_children(&mut list_cursor) {
            if decl.kind() == "field_declaration" {
                extract_field_declaration(&decl, source, aliases, &mut fields);
            }
        }
    }

    fields
}

fn extract_field_declaration(decl: &Node, source: &str, aliases: &ImportAliases, out: &mut Vec<Field>) {
    let Some(type_node) = decl.child_by_field_name("type") else {
        return;
    };
    let mut shape = analyze_type(&type_node, source, aliases);
    let mut type_name = extract_node_text_owned(&type_node, source);
    let tag = decl
        .child_by_field_name("tag")
        .map(|t| extract_node_text_owned(&t, source));
    let doc_lines = preceding_comments(decl, source);

    let mut name_cursor = decl.walk();
    let names: Vec<String> = decl
        .children_by_field_name("name", &mut name_cursor)
        .map(|n| extract_node_text_owned(&n, source))
        .collect();

    if names.is_empty() {
        // Embedded field: `*Base` keeps the star outside the type node
        let mut star_cursor = decl.walk();
        let has_star = decl.children(&mut star_cursor).any(|c| c.kind() == "*");
        if has_star {
            shape.is_pointer = true;
            type_name = format!("*{}", type_name);
        }
        let mut field = build_field(String::new(), type_name, shape);
        field.name = field.dereferenced_type_name().rsplit('.').next().unwrap_or_default().to_string();
        field.tag = tag;
        field.doc_lines = doc_lines;
        out.push(field);
        return;
    }

    for name in names {
        let mut field = build_field(name, type_name.clone(), shape.clone());
        field.tag = tag.clone();
        field.doc_lines = doc_lines.clone();
        out.push(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::infrastructure::extractors::import::extract_import_declaration;
    use crate::shared::utils::tree_sitter::find_descendant_by_kind;
    use tree_sitter::Parser;

    fn parse_go(code: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::language()).unwrap();
        parser.parse(code, None).unwrap()
    }

    fn aliases_for(root: &Node, code: &str) -> ImportAliases {
        let mut aliases = ImportAliases::new();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            for import in extract_import_declaration(&child, code) {
                aliases.register(&import);
            }
        }
        aliases
    }

    #[test]
    fn test_struct_fields() {
        let code = r#"package api

import "app/model"

type Req struct {
    // user id
    ID, Owner int `json:"id"`
    User *model.User
    Tags []string
    Meta map[string]string
    *Base
}
"#;
        let tree = parse_go(code);
        let root = tree.root_node();
        let aliases = aliases_for(&root, code);
        let struct_type = find_descendant_by_kind(&root, "struct_type").unwrap();

        let fields = extract_struct_fields(&struct_type, code, &aliases);
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["ID", "Owner", "User", "Tags", "Meta", "Base"]);

        assert_eq!(fields[0].tag.as_deref(), Some("`json:\"id\"`"));
        assert_eq!(fields[0].doc_lines, vec!["// user id".to_string()]);
        assert!(fields[2].is_pointer);
        assert_eq!(fields[2].package_name.as_deref(), Some("app/model"));
        assert!(fields[3].is_slice);
        assert!(fields[4].is_map);
        assert!(fields[5].is_pointer);
        assert_eq!(fields[5].type_name, "*Base");
    }

    #[test]
    fn test_parameters_and_results() {
        let code = r#"package api

func Handle(ctx *Ctx, a, b int, rest ...string) (n int, err error) { return }
"#;
        let tree = parse_go(code);
        let root = tree.root_node();
        let aliases = ImportAliases::new();
        let func = find_descendant_by_kind(&root, "function_declaration").unwrap();

        let params = func.child_by_field_name("parameters").unwrap();
        let inputs = extract_parameter_list(&params, code, &aliases);
        assert_eq!(inputs.len(), 4);
        assert_eq!(inputs[0].type_name, "*Ctx");
        assert_eq!(inputs[2].name, "b");
        assert_eq!(inputs[3].type_name, "...string");

        let result = func.child_by_field_name("result").unwrap();
        let outputs = extract_result(&result, code, &aliases);
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[1].type_name, "error");
    }

    #[test]
    fn test_bare_result_type() {
        let code = "package api\n\nfunc Ping() error { return nil }\n";
        let tree = parse_go(code);
        let root = tree.root_node();
        let func = find_descendant_by_kind(&root, "function_declaration").unwrap();

        let result = func.child_by_field_name("result").unwrap();
        let outputs = extract_result(&result, code, &ImportAliases::new());
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].name, "");
        assert_eq!(outputs[0].type_name, "error");
    }
}
