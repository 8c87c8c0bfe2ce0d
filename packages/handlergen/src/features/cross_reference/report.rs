//! Cross-reference outcome

use serde::Serialize;

/// A method whose receiver type has no struct in the same package.
///
/// Not an error: the operation simply stays a free function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkWarning {
    pub package_name: String,
    pub filename: String,
    pub operation: String,
    pub receiver_type: String,
}

impl std::fmt::Display for LinkWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: method {} has receiver {} with no struct in package {}",
            self.filename, self.operation, self.receiver_type, self.package_name
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossReferenceReport {
    /// Number of operations attached to a struct
    pub linked_operations: usize,

    /// Number of enums that received typedef doc lines
    pub documented_enums: usize,

    pub warnings: Vec<LinkWarning>,
}

impl CrossReferenceReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
