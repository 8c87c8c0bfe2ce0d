//! Codegen application layer

mod synthesize;

pub use synthesize::{CodeSynthesizer, DEFAULT_FILE_PREFIX};
