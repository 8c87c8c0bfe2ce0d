//! Codegen infrastructure: template rendering and formatter adapters

mod builtin_formatter;
mod gofmt_formatter;
pub mod template;

pub use builtin_formatter::BuiltinGoFormatter;
pub use gofmt_formatter::GofmtFormatter;
pub use template::{render_channel_file, GENERATED_HEADER};
