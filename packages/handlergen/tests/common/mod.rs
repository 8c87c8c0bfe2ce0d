//! Shared fixtures for integration tests
//!
//! Builds throwaway Go source trees on disk and runs the pipeline over them.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use handlergen::config::GeneratorConfig;
use handlergen::{GenerationPipeline, PipelineResult, Result};
use tempfile::TempDir;

/// A temporary Go source tree
pub struct GoTree {
    dir: TempDir,
}

impl GoTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` at `relative`, creating parent directories
    pub fn file(&self, relative: &str, contents: &str) -> &Self {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write fixture");
        self
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read generated file")
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.path(relative).exists()
    }

    pub fn run(&self) -> Result<PipelineResult> {
        self.run_with(GeneratorConfig::default())
    }

    pub fn run_with(&self, config: GeneratorConfig) -> Result<PipelineResult> {
        let config = config.validate()?;
        GenerationPipeline::new(config).run(self.root())
    }

    pub fn dry_run(&self) -> Result<PipelineResult> {
        let config = GeneratorConfig::default().validate()?;
        GenerationPipeline::new(config).with_dry_run(true).run(self.root())
    }
}

/// Go file in package `package` with one free function per `(name, directive)`
pub fn go_source(package: &str, handlers: &[(&str, &[&str])]) -> String {
    let mut src = format!("package {}\n", package);
    for (name, directives) in handlers {
        src.push('\n');
        for directive in *directives {
            src.push_str("// ");
            src.push_str(directive);
            src.push('\n');
        }
        src.push_str(&format!("func {}() {{}}\n", name));
    }
    src
}

/// Registration calls inside the generated `init` body
pub fn init_calls(generated: &str) -> Vec<String> {
    let body = generated
        .split("func init() {\n")
        .nth(1)
        .and_then(|rest| rest.split("\n}").next())
        .unwrap_or("");
    body.lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Import paths inside the generated import block, in file order
pub fn imports(generated: &str) -> Vec<String> {
    let block = generated
        .split("import (\n")
        .nth(1)
        .and_then(|rest| rest.split("\n)").next())
        .unwrap_or("");
    block
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}
