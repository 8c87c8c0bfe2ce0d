//! Cross-Reference Pass
//!
//! Second whole-model pass run after extraction and before interpretation:
//! - attaches method operations to their receiver struct
//! - copies typedef doc lines onto the same-named enum
//!
//! Links are stored as indices into `ParsedSources::operations`.

mod linker;
mod report;

pub use linker::{attach_enum_docs, link_operations, run_cross_reference};
pub use report::{CrossReferenceReport, LinkWarning};
