//! Parsing ports (interfaces)

mod extractor;
mod parser;

pub use extractor::DeclarationExtractor;
pub use parser::SourceParser;
