//! Declaration extractor port
//!
//! Walks one parsed file and classifies its declarations into the model.

use crate::features::parsing::domain::{FileDeclarations, ParsedFile};
use crate::shared::models::Result;

pub trait DeclarationExtractor: Send + Sync {
    /// Extract every Struct/Operation/Interface/Typedef/Enum of the file, in
    /// source order. Returns `None` when the file is excluded by a build
    /// constraint.
    fn extract(&self, file: &ParsedFile) -> Result<Option<FileDeclarations>>;
}
