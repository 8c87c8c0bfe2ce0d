//! Node extractors - extract model values from Go syntax nodes

pub mod field;
pub mod import;

pub use field::{extract_parameter_list, extract_result, extract_struct_fields};
pub use import::{extract_import_declaration, ImportAliases, ImportInfo};
