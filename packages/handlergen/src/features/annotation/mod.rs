//! Annotation Feature
//!
//! Interprets `@Handler(...)` directives found in operation doc comments.
//!
//! ## Structure
//! - `domain/` - Channel, Directive, accumulators, framework markers
//! - `infrastructure/` - quote-aware directive tokenizer
//! - `application/` - AnnotationInterpreter

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{AnnotationInterpreter, DEFAULT_FRAMEWORK_IMPORT, DEFAULT_MULTIPART_IMPORT};
pub use domain::{
    Channel, ChannelAccumulator, Directive, DirectiveKind, FrameworkMarkers, PackageAccumulator,
    PackageAccumulators, RegistrationRecord,
};
pub use infrastructure::{parse_directive, DirectiveError};
