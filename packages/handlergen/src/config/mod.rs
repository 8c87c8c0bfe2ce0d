//! Configuration System
//!
//! Two layers, later wins:
//! - YAML file (`version: 1` + optional `generator:` section)
//! - CLI flag overrides via builder methods
//!
//! # Examples
//!
//! ```rust,ignore
//! use handlergen::config::GeneratorConfig;
//!
//! let config = GeneratorConfig::from_yaml("handlergen.yaml")?
//!     .with_package("api")
//!     .validate()?;
//! ```

pub mod error;
pub mod generator_config;
pub mod io;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use generator_config::{FormatterKind, GeneratorConfig, ValidatedConfig, SUPPORTED_VERSIONS};
pub use io::ConfigFileV1;
