//! Annotation domain models

mod accumulator;
mod channel;
mod directive;
mod markers;

pub use accumulator::{
    ChannelAccumulator, PackageAccumulator, PackageAccumulators, RegistrationRecord,
};
pub use channel::Channel;
pub use directive::{Directive, DirectiveKind};
pub use markers::{FrameworkMarkers, HANDLER_MARKER};
