//! Generated output file

use std::path::PathBuf;

use serde::Serialize;

use crate::features::annotation::domain::Channel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub package_name: String,

    /// Package directory relative to the input root
    pub directory: String,

    pub channel: Channel,

    /// Absolute target path
    pub path: PathBuf,

    /// Formatted source text
    pub contents: String,

    /// Number of constructor calls in `init()`
    pub registrations: usize,
}
