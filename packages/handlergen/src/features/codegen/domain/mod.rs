//! Codegen domain models

mod generated_file;
mod schema;

pub use generated_file::GeneratedFile;
pub use schema::{ChannelSchema, ColumnSpec, FormatRule};
