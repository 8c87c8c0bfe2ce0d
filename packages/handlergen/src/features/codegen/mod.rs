//! Code Synthesis Feature
//!
//! Turns package accumulators into formatted `<prefix><channel>_api_handler.go`
//! files.
//!
//! ## Structure
//! - `domain/` - ChannelSchema (ordered columns), GeneratedFile
//! - `ports/` - SourceFormatter trait
//! - `infrastructure/` - file template, builtin and gofmt formatters
//! - `application/` - CodeSynthesizer

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{CodeSynthesizer, DEFAULT_FILE_PREFIX};
pub use domain::{ChannelSchema, ColumnSpec, FormatRule, GeneratedFile};
pub use infrastructure::{BuiltinGoFormatter, GofmtFormatter};
pub use ports::SourceFormatter;
