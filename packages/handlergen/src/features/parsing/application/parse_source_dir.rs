//! Parse source directory use case
//!
//! Discover → read → parse → extract, file by file. The first failing file
//! aborts the whole run; no partial model is returned.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::features::parsing::domain::ParsedSources;
use crate::features::parsing::infrastructure::SourceWalker;
use crate::features::parsing::ports::{DeclarationExtractor, SourceParser};
use crate::shared::models::{HandlergenError, Result};

pub struct ParseSourceDirUseCase<P: SourceParser, E: DeclarationExtractor> {
    parser: P,
    extractor: E,
    walker: SourceWalker,
}

impl<P: SourceParser, E: DeclarationExtractor> ParseSourceDirUseCase<P, E> {
    pub fn new(parser: P, extractor: E, walker: SourceWalker) -> Self {
        Self {
            parser,
            extractor,
            walker,
        }
    }

    /// Build the declaration model for every file under `root`
    pub fn execute(&self, root: &Path) -> Result<ParsedSources> {
        let files = self.walker.discover(root)?;
        let mut sources = ParsedSources::new(root);
        let mut skipped = 0usize;

        for file in &files {
            let text = fs::read_to_string(&file.path).map_err(|e| {
                HandlergenError::io(format!("failed to read source: {}", e))
                    .with_file(file.relative.as_str())
                    .with_source(e)
            })?;

            let parsed = self.parser.parse(&text, &file.relative)?;
            match self.extractor.extract(&parsed)? {
                Some(decls) => {
                    debug!(
                        file = %file.relative,
                        package = %decls.package_name,
                        operations = decls.operations.len(),
                        structs = decls.structs.len(),
                        "Extracted declarations"
                    );
                    sources.push_file(decls);
                }
                None => {
                    skipped += 1;
                    debug!(file = %file.relative, "Skipping file excluded by build constraint");
                }
            }
        }

        info!(
            files = files.len(),
            skipped,
            packages = sources.packages.len(),
            structs = sources.structs.len(),
            operations = sources.operations.len(),
            interfaces = sources.interfaces.len(),
            typedefs = sources.typedefs.len(),
            enums = sources.enums.len(),
            "Model extracted"
        );

        Ok(sources)
    }
}
