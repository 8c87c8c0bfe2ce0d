/*
 * handlergen - @Handler registration code generator for Go packages
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, HandlergenError)
 * - features/    : Vertical slices (parsing → cross_reference → annotation → codegen)
 * - pipeline/    : Orchestration
 * - config/      : YAML + CLI configuration
 *
 * Stages run strictly in sequence; the first fatal error aborts the run.
 */

// Crate-level lint configuration
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::upper_case_acronyms)] // HTTP/TCP naming

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (extract → link → interpret → synthesize)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{FormatterKind, GeneratorConfig, ValidatedConfig};
pub use features::annotation::{AnnotationInterpreter, Channel, PackageAccumulators};
pub use features::codegen::{CodeSynthesizer, GeneratedFile};
pub use features::cross_reference::{run_cross_reference, CrossReferenceReport};
pub use features::parsing::ParsedSources;
pub use pipeline::{GenerationPipeline, PipelineResult, PipelineStats};
pub use shared::models::{ErrorKind, HandlergenError, Result};
