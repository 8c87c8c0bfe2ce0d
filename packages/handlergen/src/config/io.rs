//! Configuration I/O (YAML schema)

use serde::{Deserialize, Serialize};

use super::generator_config::GeneratorConfig;

/// YAML Schema v1
///
/// ```yaml
/// version: 1
/// generator:
///   exclude_pattern: "^gen_.*\\.go$"
///   formatter: gofmt
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<GeneratorConfig>,
}
