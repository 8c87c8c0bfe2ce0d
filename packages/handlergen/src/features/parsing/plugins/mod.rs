//! Language plugins
//!
//! Each plugin implements the DeclarationExtractor trait for one language.

pub mod go;

pub use go::GoPlugin;
