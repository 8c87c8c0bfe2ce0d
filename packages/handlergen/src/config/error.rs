//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filename pattern does not compile
    #[error("Invalid regex for '{field}': {source}")]
    InvalidRegex {
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    /// Generated files would be picked up as input on the next run
    #[error("Exclude pattern '{pattern}' does not match generated file '{sample}'. Generated files must be excluded from input discovery.")]
    PrefixNotExcluded { pattern: String, sample: String },

    /// Empty output file prefix
    #[error("file_prefix must not be empty")]
    EmptyPrefix,

    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Unknown formatter name
    #[error("Unknown formatter '{0}'. Valid formatters: builtin, gofmt")]
    UnknownFormatter(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;
