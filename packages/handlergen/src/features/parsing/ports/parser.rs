//! Parser port (interface)
//!
//! Defines the contract for turning source text into a declaration tree.

use crate::features::parsing::domain::ParsedFile;
use crate::shared::models::Result;

/// Parser trait - abstraction over parsing implementation
pub trait SourceParser: Send + Sync {
    /// Parse source code into a ParsedFile.
    ///
    /// A tree containing syntax errors is an error: no partial model is built.
    fn parse(&self, source: &str, filename: &str) -> Result<ParsedFile>;

    /// Check if this parser supports the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Get supported language name
    fn language_name(&self) -> &'static str;
}
