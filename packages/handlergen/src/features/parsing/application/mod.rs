//! Parsing application layer (use cases)

mod parse_source_dir;

pub use parse_source_dir::ParseSourceDirUseCase;
