//! Generator configuration
//!
//! Defaults reproduce the stock behavior; a YAML file and CLI flags override
//! individual fields. `validate()` compiles the filename patterns once.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigFileV1;

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Formatter applied to rendered output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// tree-sitter validation plus layout normalization
    #[default]
    Builtin,
    /// External `gofmt` binary
    Gofmt,
}

impl FromStr for FormatterKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "builtin" => Ok(FormatterKind::Builtin),
            "gofmt" => Ok(FormatterKind::Gofmt),
            _ => Err(ConfigError::UnknownFormatter(s.to_string())),
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterKind::Builtin => f.write_str("builtin"),
            FormatterKind::Gofmt => f.write_str("gofmt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Input files must match (file name only)
    pub include_pattern: String,

    /// Input files matching this are skipped (file name only)
    pub exclude_pattern: String,

    /// Prefix of generated file names
    pub file_prefix: String,

    /// Descend into subdirectories
    pub recursive: bool,

    /// Framework import seeded into every generated file
    pub framework_import: String,

    /// Import added for `valid.file` validators
    pub multipart_import: String,

    pub formatter: FormatterKind,

    /// gofmt binary used when `formatter: gofmt`
    pub gofmt_path: String,

    /// Only synthesize packages with this name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            include_pattern: r"^.*\.go$".to_string(),
            exclude_pattern: r"^gen_.*\.go$".to_string(),
            file_prefix: "gen_".to_string(),
            recursive: true,
            framework_import: "framework/common/net_fw".to_string(),
            multipart_import: "github.com/valyala/fasthttp/zzz/mime/multipart".to_string(),
            formatter: FormatterKind::Builtin,
            gofmt_path: "gofmt".to_string(),
            package: None,
        }
    }
}

impl GeneratorConfig {
    /// Load from a YAML file (`version: 1`, optional `generator:` section)
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        // Version check
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        Ok(file.generator.unwrap_or_default())
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            generator: Some(self.clone()),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    // Builder-style overrides (CLI flags win over YAML)

    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    pub fn with_formatter(mut self, formatter: FormatterKind) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn with_exclude_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_pattern = pattern.into();
        self
    }

    /// Compile patterns and check generated files cannot become input
    pub fn validate(self) -> ConfigResult<ValidatedConfig> {
        if self.file_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }

        let include = Regex::new(&self.include_pattern).map_err(|source| {
            ConfigError::InvalidRegex {
                field: "include_pattern",
                source,
            }
        })?;
        let exclude = Regex::new(&self.exclude_pattern).map_err(|source| {
            ConfigError::InvalidRegex {
                field: "exclude_pattern",
                source,
            }
        })?;

        let sample = format!("{}http_api_handler.go", self.file_prefix);
        if include.is_match(&sample) && !exclude.is_match(&sample) {
            return Err(ConfigError::PrefixNotExcluded {
                pattern: self.exclude_pattern.clone(),
                sample,
            });
        }

        Ok(ValidatedConfig {
            config: self,
            include,
            exclude,
        })
    }
}

/// Configuration whose patterns are known to compile
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    config: GeneratorConfig,
    include: Regex,
    exclude: Regex,
}

impl ValidatedConfig {
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn include(&self) -> &Regex {
        &self.include
    }

    pub fn exclude(&self) -> &Regex {
        &self.exclude
    }

    pub fn into_inner(self) -> GeneratorConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_validate() {
        let validated = GeneratorConfig::default().validate().unwrap();
        assert!(validated.include().is_match("user.go"));
        assert!(validated.exclude().is_match("gen_http_api_handler.go"));
        assert!(!validated.exclude().is_match("generator.go"));
        assert_eq!(validated.config().formatter, FormatterKind::Builtin);
    }

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
version: 1
generator:
  formatter: gofmt
  package: api
  recursive: false
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml_content.as_bytes()).unwrap();

        let config = GeneratorConfig::from_yaml(file.path()).unwrap();
        assert_eq!(config.formatter, FormatterKind::Gofmt);
        assert_eq!(config.package.as_deref(), Some("api"));
        assert!(!config.recursive);
        assert_eq!(config.file_prefix, "gen_");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = GeneratorConfig::default().with_package("api");
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("package: api"));

        let loaded = GeneratorConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_version_errors() {
        let err = GeneratorConfig::from_yaml_str("generator: {}\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingVersion));

        let err = GeneratorConfig::from_yaml_str("version: 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { found: 2, .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = GeneratorConfig::from_yaml_str("version: 1\ngenerator:\n  prefx: x_\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_invalid_regex() {
        let err = GeneratorConfig {
            include_pattern: "([".to_string(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRegex { field: "include_pattern", .. }));
    }

    #[test]
    fn test_prefix_must_be_excluded() {
        let err = GeneratorConfig::default()
            .with_file_prefix("zz_")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::PrefixNotExcluded { .. }));

        let ok = GeneratorConfig::default()
            .with_file_prefix("zz_")
            .with_exclude_pattern(r"^zz_.*\.go$")
            .validate();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_formatter_from_str() {
        assert_eq!("GOFMT".parse::<FormatterKind>().unwrap(), FormatterKind::Gofmt);
        assert!(matches!(
            "clang".parse::<FormatterKind>(),
            Err(ConfigError::UnknownFormatter(_))
        ));
    }
}
