//! Annotation infrastructure

pub mod tokenizer;

pub use tokenizer::{directive_text, parse_directive, strip_comment_marker, unquote, DirectiveError};
