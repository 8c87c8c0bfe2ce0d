//! Parsed `@Handler` directive

use serde::Serialize;

/// Handler selected by the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DirectiveKind {
    /// `type="api"`: registers the operation on a channel
    Api,
    /// `type="valid.limit"`: access-limit validator
    ValidLimit,
    /// `type="valid.file"`: upload file-header validator
    ValidFile,
}

impl DirectiveKind {
    /// Substring match on the unquoted `type` value, validators first
    pub fn from_type(value: &str) -> Option<Self> {
        if value.contains("valid.limit") {
            Some(DirectiveKind::ValidLimit)
        } else if value.contains("valid.file") {
            Some(DirectiveKind::ValidFile)
        } else if value.contains("api") {
            Some(DirectiveKind::Api)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveKind::Api => "api",
            DirectiveKind::ValidLimit => "valid.limit",
            DirectiveKind::ValidFile => "valid.file",
        }
    }
}

/// One directive line: its kind plus the remaining `(key, rawValue)` pairs
/// in source order. Raw values keep their quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub fields: Vec<(String, String)>,

    /// Directive text as written, for error reporting
    pub text: String,
}

impl Directive {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
