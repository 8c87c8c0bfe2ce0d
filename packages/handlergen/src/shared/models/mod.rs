//! Shared models

mod error;
mod span;

pub use error::{ErrorKind, HandlergenError, Result};
pub use span::Span;
