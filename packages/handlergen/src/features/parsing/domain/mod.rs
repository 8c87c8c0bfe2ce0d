//! Parsing domain models

mod declarations;
mod parsed_file;
mod parsed_sources;

pub use declarations::{
    Enum, EnumLiteral, Field, FileDeclarations, Interface, Operation, Struct, Typedef,
};
pub use parsed_file::ParsedFile;
pub use parsed_sources::{directory_of, PackageInfo, ParsedSources};
