//! Pipeline result types

use std::time::Duration;

use serde::Serialize;

use crate::features::codegen::GeneratedFile;
use crate::features::cross_reference::CrossReferenceReport;
use crate::features::parsing::ParsedSources;

/// Per-run counters and timings
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineStats {
    /// Total execution time
    pub total_duration: Duration,

    /// Per-stage durations, in execution order
    pub stage_durations: Vec<(String, Duration)>,

    pub files_parsed: usize,
    pub packages_annotated: usize,
    pub files_generated: usize,
    pub registrations: usize,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_stage(&mut self, stage: &str, duration: Duration) {
        self.stage_durations.push((stage.to_string(), duration));
    }

    pub fn stage_duration(&self, stage: &str) -> Option<Duration> {
        self.stage_durations
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, d)| *d)
    }
}

/// Everything one generation run produced
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Linked declaration model
    pub sources: ParsedSources,

    pub cross_reference: CrossReferenceReport,

    /// Generated files, written unless the run was a dry run
    pub files: Vec<GeneratedFile>,

    pub dry_run: bool,

    pub stats: PipelineStats,
}

impl PipelineResult {
    pub fn file_paths(&self) -> impl Iterator<Item = &std::path::Path> {
        self.files.iter().map(|f| f.path.as_path())
    }
}
