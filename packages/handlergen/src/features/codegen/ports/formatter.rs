//! Formatter port
//!
//! Final validation and normalization step for rendered Go source.

use crate::shared::models::Result;

pub trait SourceFormatter: Send + Sync {
    /// Format `source`, or fail with a Synthesis error when it is not valid Go.
    ///
    /// `filename` is only used for error context.
    fn format(&self, source: &str, filename: &str) -> Result<String>;

    fn name(&self) -> &'static str;
}
