//! gofmt adapter
//!
//! Pipes rendered source through an external `gofmt` binary.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::features::codegen::ports::SourceFormatter;
use crate::shared::models::{HandlergenError, Result};

#[derive(Debug, Clone)]
pub struct GofmtFormatter {
    binary: PathBuf,
}

impl Default for GofmtFormatter {
    fn default() -> Self {
        Self::new("gofmt")
    }
}

impl GofmtFormatter {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

/// First line number in gofmt's `<standard input>:LINE:COL: msg` output
fn error_line(stderr: &str) -> Option<u32> {
    stderr
        .lines()
        .next()?
        .strip_prefix("<standard input>:")?
        .split(':')
        .next()?
        .parse()
        .ok()
}

impl SourceFormatter for GofmtFormatter {
    fn format(&self, source: &str, filename: &str) -> Result<String> {
        let mut child = Command::new(&self.binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                HandlergenError::synthesis(format!(
                    "failed to run {}: {}",
                    self.binary.display(),
                    e
                ))
                .with_file(filename)
                .with_source(e)
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes())?;
        }
        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut err = HandlergenError::synthesis(format!(
                "gofmt rejected generated code: {}",
                stderr.trim()
            ))
            .with_file(filename);
            if let Some(line) = error_line(&stderr) {
                err = err.with_line(line);
            }
            return Err(err);
        }

        String::from_utf8(output.stdout).map_err(|e| {
            HandlergenError::synthesis("gofmt produced non-UTF-8 output")
                .with_file(filename)
                .with_source(e)
        })
    }

    fn name(&self) -> &'static str {
        "gofmt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::ErrorKind;

    #[test]
    fn test_error_line() {
        assert_eq!(
            error_line("<standard input>:4:26: expected operand, found ','\n"),
            Some(4)
        );
        assert_eq!(error_line("gofmt: broken"), None);
    }

    #[test]
    fn test_missing_binary_is_synthesis_error() {
        let formatter = GofmtFormatter::new("/nonexistent/gofmt-handlergen");
        let err = formatter.format("package api\n", "gen.go").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Synthesis);
        assert_eq!(formatter.name(), "gofmt");
    }
}
