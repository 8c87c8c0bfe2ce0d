//! Parsing Feature
//!
//! Turns a directory of Go sources into the declaration model.
//!
//! ## Structure
//! - `domain/` - Field, Operation, Struct, Interface, Typedef, Enum, ParsedSources
//! - `ports/` - SourceParser trait, DeclarationExtractor trait
//! - `application/` - ParseSourceDirUseCase
//! - `infrastructure/` - TreeSitterParser, SourceWalker, node extractors
//! - `plugins/` - GoPlugin

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugins;
pub mod ports;

// Re-exports
pub use application::ParseSourceDirUseCase;
pub use domain::{
    Enum, EnumLiteral, Field, FileDeclarations, Interface, Operation, PackageInfo, ParsedFile,
    ParsedSources, Struct, Typedef,
};

// Re-export infrastructure (internal use - prefer application layer)
#[doc(hidden)]
pub use infrastructure::{SourceWalker, TreeSitterParser};
pub use plugins::GoPlugin;
pub use ports::{DeclarationExtractor, SourceParser};
