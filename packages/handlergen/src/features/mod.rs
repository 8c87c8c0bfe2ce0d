//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains (where it needs them):
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations

/// Declaration model extraction from Go sources
pub mod parsing;

/// Operation ↔ struct linking, enum doc attachment
pub mod cross_reference;

/// `@Handler` directive interpretation
pub mod annotation;

/// Registration file synthesis
pub mod codegen;
