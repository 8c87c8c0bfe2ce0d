//! Declaration model
//!
//! Normalized intermediate model produced by the Go declaration extractor.
//! Values only: nothing here outlives a single generation run.

use serde::Serialize;

/// A typed name: struct field, parameter, result or method receiver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field name (empty for unnamed parameters and results)
    pub name: String,

    /// Type exactly as written in source (e.g. `*pkg.User`, `[]byte`)
    pub type_name: String,

    /// Import path of the qualifier when the type is `pkg.Type`
    pub package_name: Option<String>,

    pub is_pointer: bool,
    pub is_slice: bool,
    pub is_map: bool,

    /// Struct tag literal, quotes included
    pub tag: Option<String>,

    pub doc_lines: Vec<String>,
}

impl Field {
    /// Type name with pointer markers and type arguments removed.
    ///
    /// `*Maps[K, V]` and `Maps` both yield `Maps`.
    pub fn dereferenced_type_name(&self) -> &str {
        let name = self.type_name.trim_start_matches(|c: char| c == '*' || c.is_whitespace());
        let name = name.trim_start_matches('(').trim_end_matches(')');
        let name = name.trim_start_matches('*');
        match name.find('[') {
            Some(idx) => name[..idx].trim(),
            None => name.trim(),
        }
    }
}

/// Free function or method
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub package_name: String,

    /// Source file, relative to the input root
    pub filename: String,

    pub name: String,

    /// 1-based line of the `func` keyword
    pub line: u32,

    /// Raw comment lines, verbatim and in order
    pub doc_lines: Vec<String>,

    pub input_args: Vec<Field>,
    pub output_args: Vec<Field>,

    /// Receiver; present only for methods
    pub related_struct: Option<Field>,
}

impl Operation {
    /// Canonical handler key (`Filename+Name`)
    pub fn handler_key(&self) -> String {
        format!("{}{}", self.filename, self.name)
    }

    pub fn is_method(&self) -> bool {
        self.related_struct.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Struct {
    pub name: String,
    pub package_name: String,
    pub filename: String,
    pub fields: Vec<Field>,
    pub doc_lines: Vec<String>,

    /// Indices into `ParsedSources::operations`, filled by the cross-reference pass
    pub operations: Vec<usize>,
}

/// Interface declaration (descriptive only, never generated from)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Interface {
    pub name: String,
    pub package_name: String,
    pub filename: String,
    pub doc_lines: Vec<String>,
    pub methods: Vec<Operation>,
}

/// Named non-struct, non-interface type (`type Color int`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Typedef {
    pub name: String,
    pub package_name: String,
    pub filename: String,

    /// Underlying type when it is a plain identifier, else empty
    #[serde(rename = "type")]
    pub type_name: String,

    pub doc_lines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumLiteral {
    pub name: String,
    pub value: String,
}

/// Typed `const` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Enum {
    pub name: String,
    pub package_name: String,
    pub filename: String,

    /// Copied from the same-named Typedef by the cross-reference pass
    pub doc_lines: Vec<String>,

    pub enum_literals: Vec<EnumLiteral>,
}

/// Everything extracted from one source file
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileDeclarations {
    pub package_name: String,
    pub filename: String,
    pub structs: Vec<Struct>,
    pub operations: Vec<Operation>,
    pub interfaces: Vec<Interface>,
    pub typedefs: Vec<Typedef>,
    pub enums: Vec<Enum>,
}
