//! Pipeline orchestration

pub mod orchestrator;
pub mod result;

pub use orchestrator::{create_formatter, GenerationPipeline};
pub use result::{PipelineResult, PipelineStats};
