//! Whole-run declaration model
//!
//! Arena of entity values with stable indices. Cross-references between
//! entities (struct → operations) are stored as indices, never as pointers.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::declarations::{Enum, FileDeclarations, Interface, Operation, Struct, Typedef};

/// One Go package: a package clause within one directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub name: String,

    /// Directory relative to the input root, `/`-separated ("" for the root)
    pub directory: String,

    /// Files in processing order
    pub files: Vec<String>,
}

/// Full declaration model for one run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedSources {
    pub root: PathBuf,
    pub packages: Vec<PackageInfo>,
    pub structs: Vec<Struct>,
    pub operations: Vec<Operation>,
    pub interfaces: Vec<Interface>,
    pub typedefs: Vec<Typedef>,
    pub enums: Vec<Enum>,
}

impl ParsedSources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Append one file's declarations, registering its package on first sight
    pub fn push_file(&mut self, file: FileDeclarations) {
        let directory = directory_of(&file.filename).to_string();
        match self
            .packages
            .iter_mut()
            .find(|p| p.name == file.package_name && p.directory == directory)
        {
            Some(package) => package.files.push(file.filename.clone()),
            None => self.packages.push(PackageInfo {
                name: file.package_name.clone(),
                directory,
                files: vec![file.filename.clone()],
            }),
        }

        self.structs.extend(file.structs);
        self.operations.extend(file.operations);
        self.interfaces.extend(file.interfaces);
        self.typedefs.extend(file.typedefs);
        self.enums.extend(file.enums);
    }

    /// Operations linked to `s` by the cross-reference pass
    pub fn struct_operations<'a>(&'a self, s: &'a Struct) -> impl Iterator<Item = &'a Operation> + 'a {
        s.operations.iter().filter_map(move |&idx| self.operations.get(idx))
    }

    /// Absolute directory of a package
    pub fn package_path(&self, package: &PackageInfo) -> PathBuf {
        if package.directory.is_empty() {
            self.root.clone()
        } else {
            self.root.join(Path::new(&package.directory))
        }
    }

    pub fn find_package(&self, name: &str, directory: &str) -> Option<&PackageInfo> {
        self.packages
            .iter()
            .find(|p| p.name == name && p.directory == directory)
    }
}

/// Directory part of a `/`-separated relative filename ("" for top-level files)
pub fn directory_of(filename: &str) -> &str {
    match filename.rfind('/') {
        Some(idx) => &filename[..idx],
        None => "",
    }
}
