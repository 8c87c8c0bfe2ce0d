//! Error types for the handlergen crate
//!
//! Unified error handling across all pipeline stages.
//!
//! Features:
//! - Categorized error kinds for the fatal stages (linking only warns)
//! - Optional file path and line context
//! - Source error chaining

use std::fmt;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source file could not be parsed into a declaration tree
    Parse,
    /// A `@Handler` directive line is malformed
    Directive,
    /// Rendered output rejected by the formatter, or output collision
    Synthesis,
    /// Configuration errors
    Config,
    /// IO errors
    IO,
    /// Internal errors (bugs)
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Directive => "directive",
            ErrorKind::Synthesis => "synthesis",
            ErrorKind::Config => "config",
            ErrorKind::IO => "io",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Unified error type
#[derive(Debug)]
pub struct HandlergenError {
    pub kind: ErrorKind,
    pub message: String,
    pub file_path: Option<String>,
    pub line: Option<u32>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl HandlergenError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file_path: None,
            line: None,
            source: None,
        }
    }

    pub fn with_file(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn directive(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Directive, message)
    }

    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Synthesis, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IO, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl fmt::Display for HandlergenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ref file) = self.file_path {
            write!(f, " in {}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for HandlergenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, HandlergenError>;

impl From<std::io::Error> for HandlergenError {
    fn from(err: std::io::Error) -> Self {
        HandlergenError::io(format!("IO error: {}", err)).with_source(err)
    }
}

impl From<walkdir::Error> for HandlergenError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.display().to_string());
        let mut error = HandlergenError::io(format!("Walk error: {}", err));
        if let Some(path) = path {
            error = error.with_file(path);
        }
        error.with_source(err)
    }
}

impl From<serde_json::Error> for HandlergenError {
    fn from(err: serde_json::Error) -> Self {
        HandlergenError::internal(format!("JSON serialization error: {}", err)).with_source(err)
    }
}

impl From<crate::config::ConfigError> for HandlergenError {
    fn from(err: crate::config::ConfigError) -> Self {
        HandlergenError::config(err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_with_location() {
        let err = HandlergenError::directive("unterminated quote")
            .with_file("api/user.go")
            .with_line(12);
        assert_eq!(
            err.to_string(),
            "[directive] unterminated quote in api/user.go:12"
        );
    }

    #[test]
    fn test_error_display_without_location() {
        let err = HandlergenError::synthesis("formatter rejected output");
        assert_eq!(err.to_string(), "[synthesis] formatter rejected output");
        assert_eq!(err.kind, ErrorKind::Synthesis);
    }

    #[test]
    fn test_io_error_conversion_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: HandlergenError = io.into();
        assert_eq!(err.kind, ErrorKind::IO);
        assert!(std::error::Error::source(&err).is_some());
    }
}
