//! Annotation application layer

mod interpreter;

pub use interpreter::{AnnotationInterpreter, DEFAULT_FRAMEWORK_IMPORT, DEFAULT_MULTIPART_IMPORT};
