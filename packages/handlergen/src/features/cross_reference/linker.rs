//! Struct ↔ operation linking and enum documentation
//!
//! Lookups are scoped to a package: (package name, directory, type name).
//! Two packages sharing a name in different directories never link across.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::report::{CrossReferenceReport, LinkWarning};
use crate::features::parsing::domain::{directory_of, ParsedSources};

type ScopedName<'a> = (&'a str, &'a str, &'a str);

/// Run both linking steps to completion
pub fn run_cross_reference(sources: &mut ParsedSources) -> CrossReferenceReport {
    let mut report = link_operations(sources);
    report.documented_enums = attach_enum_docs(sources);

    debug!(
        linked = report.linked_operations,
        documented_enums = report.documented_enums,
        warnings = report.warnings.len(),
        "Cross-reference pass complete"
    );
    report
}

/// Append every method operation to the struct named by its receiver.
///
/// Free functions are untouched. Re-running does not duplicate links.
pub fn link_operations(sources: &mut ParsedSources) -> CrossReferenceReport {
    let mut report = CrossReferenceReport::default();

    let mut links: Vec<(usize, usize)> = Vec::new();
    {
        let index: FxHashMap<ScopedName, usize> = sources
            .structs
            .iter()
            .enumerate()
            .map(|(idx, s)| {
                let key = (s.package_name.as_str(), directory_of(&s.filename), s.name.as_str());
                (key, idx)
            })
            .rev() // first declaration wins on duplicate names
            .collect();

        for (op_idx, op) in sources.operations.iter().enumerate() {
            let Some(receiver) = op.related_struct.as_ref() else {
                continue;
            };
            let type_name = receiver.dereferenced_type_name();
            let key = (op.package_name.as_str(), directory_of(&op.filename), type_name);

            match index.get(&key) {
                Some(&struct_idx) => links.push((struct_idx, op_idx)),
                None => {
                    let warning = LinkWarning {
                        package_name: op.package_name.clone(),
                        filename: op.filename.clone(),
                        operation: op.name.clone(),
                        receiver_type: type_name.to_string(),
                    };
                    warn!(%warning, "Unlinked method");
                    report.warnings.push(warning);
                }
            }
        }
    }

    for (struct_idx, op_idx) in links {
        let operations = &mut sources.structs[struct_idx].operations;
        if !operations.contains(&op_idx) {
            operations.push(op_idx);
            report.linked_operations += 1;
        }
    }

    report
}

/// Copy the doc lines of the first same-named typedef onto each enum.
///
/// Returns the number of enums that found a typedef.
pub fn attach_enum_docs(sources: &mut ParsedSources) -> usize {
    let mut first_typedef: FxHashMap<ScopedName, usize> = FxHashMap::default();
    for (idx, t) in sources.typedefs.iter().enumerate() {
        let key = (t.package_name.as_str(), directory_of(&t.filename), t.name.as_str());
        first_typedef.entry(key).or_insert(idx);
    }

    let mut docs: Vec<(usize, Vec<String>)> = Vec::new();
    for (enum_idx, e) in sources.enums.iter().enumerate() {
        let key = (e.package_name.as_str(), directory_of(&e.filename), e.name.as_str());
        if let Some(&typedef_idx) = first_typedef.get(&key) {
            docs.push((enum_idx, sources.typedefs[typedef_idx].doc_lines.clone()));
        }
    }

    let documented = docs.len();
    for (enum_idx, doc_lines) in docs {
        sources.enums[enum_idx].doc_lines = doc_lines;
    }
    documented
}
