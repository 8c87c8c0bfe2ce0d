//! Generation pipeline
//!
//! Extract → Cross-Reference → Interpret → Synthesize, strictly sequential.
//! The first fatal error aborts the run.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use super::result::{PipelineResult, PipelineStats};
use crate::config::{FormatterKind, ValidatedConfig};
use crate::features::annotation::AnnotationInterpreter;
use crate::features::codegen::{BuiltinGoFormatter, CodeSynthesizer, GofmtFormatter, SourceFormatter};
use crate::features::cross_reference::{run_cross_reference, CrossReferenceReport};
use crate::features::parsing::{
    GoPlugin, ParseSourceDirUseCase, ParsedSources, SourceWalker, TreeSitterParser,
};
use crate::shared::models::Result;

/// Formatter adapter selected by configuration
pub fn create_formatter(config: &ValidatedConfig) -> Box<dyn SourceFormatter> {
    match config.config().formatter {
        FormatterKind::Builtin => Box::new(BuiltinGoFormatter::new()),
        FormatterKind::Gofmt => Box::new(GofmtFormatter::new(&config.config().gofmt_path)),
    }
}

pub struct GenerationPipeline {
    config: ValidatedConfig,
    dry_run: bool,
}

impl GenerationPipeline {
    pub fn new(config: ValidatedConfig) -> Self {
        Self {
            config,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    fn parse_use_case(&self) -> ParseSourceDirUseCase<TreeSitterParser, GoPlugin> {
        let walker = SourceWalker::new(
            self.config.include().clone(),
            self.config.exclude().clone(),
            self.config.config().recursive,
        );
        ParseSourceDirUseCase::new(TreeSitterParser::go(), GoPlugin::new(), walker)
    }

    /// Extract and link the declaration model only
    pub fn extract(&self, root: &Path) -> Result<(ParsedSources, CrossReferenceReport)> {
        let mut sources = self.parse_use_case().execute(root)?;
        let report = run_cross_reference(&mut sources);
        Ok((sources, report))
    }

    /// Run all four stages over `root`
    pub fn run(&self, root: &Path) -> Result<PipelineResult> {
        let total_start = Instant::now();
        let mut stats = PipelineStats::new();
        let config = self.config.config();

        info!(root = %root.display(), dry_run = self.dry_run, "Starting generation");

        // Stage 1: Extract
        let start = Instant::now();
        let mut sources = self.parse_use_case().execute(root)?;
        stats.record_stage("extract", start.elapsed());
        stats.files_parsed = sources.packages.iter().map(|p| p.files.len()).sum();

        // Stage 2: Cross-Reference
        let start = Instant::now();
        let cross_reference = run_cross_reference(&mut sources);
        stats.record_stage("cross_reference", start.elapsed());

        // Stage 3: Interpret
        let start = Instant::now();
        let interpreter =
            AnnotationInterpreter::new(config.framework_import.clone(), config.multipart_import.clone())
                .with_package(config.package.clone());
        let packages = interpreter.interpret(&sources)?;
        stats.record_stage("interpret", start.elapsed());
        stats.packages_annotated = packages.len();

        // Stage 4: Synthesize
        let start = Instant::now();
        let synthesizer = CodeSynthesizer::new(create_formatter(&self.config), interpreter.markers())
            .with_file_prefix(config.file_prefix.clone())
            .with_dry_run(self.dry_run);
        let files = synthesizer.synthesize(root, &packages)?;
        stats.record_stage("synthesize", start.elapsed());
        stats.files_generated = files.len();
        stats.registrations = files.iter().map(|f| f.registrations).sum();

        stats.total_duration = total_start.elapsed();
        info!(
            files = stats.files_generated,
            registrations = stats.registrations,
            link_warnings = cross_reference.warnings.len(),
            elapsed_ms = stats.total_duration.as_millis() as u64,
            "Generation complete"
        );

        Ok(PipelineResult {
            sources,
            cross_reference,
            files,
            dry_run: self.dry_run,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_run_records_all_stages() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.go"),
            "package api\n\n// @Handler(type=\"api\", net=\"tcp\", msgId=\"1\")\nfunc Ping() {}\n",
        )
        .unwrap();

        let pipeline = GenerationPipeline::new(GeneratorConfig::default().validate().unwrap());
        let result = pipeline.run(dir.path()).unwrap();

        let stages: Vec<&str> = result
            .stats
            .stage_durations
            .iter()
            .map(|(s, _)| s.as_str())
            .collect();
        assert_eq!(stages, vec!["extract", "cross_reference", "interpret", "synthesize"]);
        assert_eq!(result.stats.files_parsed, 1);
        assert_eq!(result.stats.registrations, 1);
        assert!(dir.path().join("gen_tcp_api_handler.go").exists());
    }

    #[test]
    fn test_package_filter() {
        let dir = TempDir::new().unwrap();
        for (sub, pkg) in [("api", "api"), ("user", "user")] {
            fs::create_dir(dir.path().join(sub)).unwrap();
            fs::write(
                dir.path().join(sub).join("h.go"),
                format!(
                    "package {}\n\n// @Handler(type=\"api\", net=\"http\", path=\"/x\")\nfunc H() {{}}\n",
                    pkg
                ),
            )
            .unwrap();
        }

        let config = GeneratorConfig::default().with_package("user").validate().unwrap();
        let result = GenerationPipeline::new(config)
            .with_dry_run(true)
            .run(dir.path())
            .unwrap();

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].package_name, "user");
        assert!(!dir.path().join("user/gen_http_api_handler.go").exists());
    }
}
