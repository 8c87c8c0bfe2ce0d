//! Codegen ports

mod formatter;

pub use formatter::SourceFormatter;
