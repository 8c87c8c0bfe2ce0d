//! Code Synthesizer
//!
//! Renders, formats and writes one file per (package, non-empty channel).
//! Output collisions are detected for the whole run before anything is
//! written. Later failures leave already written files in place.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::features::annotation::domain::{
    Channel, FrameworkMarkers, PackageAccumulator, PackageAccumulators,
};
use crate::features::codegen::domain::{ChannelSchema, GeneratedFile};
use crate::features::codegen::infrastructure::render_channel_file;
use crate::features::codegen::ports::SourceFormatter;
use crate::shared::models::{HandlergenError, Result};

pub const DEFAULT_FILE_PREFIX: &str = "gen_";

pub struct CodeSynthesizer {
    formatter: Box<dyn SourceFormatter>,
    file_prefix: String,
    schemas: [ChannelSchema; 3],
    dry_run: bool,
}

impl CodeSynthesizer {
    pub fn new(formatter: Box<dyn SourceFormatter>, markers: &FrameworkMarkers) -> Self {
        Self {
            formatter,
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            schemas: Channel::ALL.map(|c| ChannelSchema::for_channel(c, markers)),
            dry_run: false,
        }
    }

    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Render and format without touching the filesystem
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn schema(&self, channel: Channel) -> &ChannelSchema {
        &self.schemas[channel.index()]
    }

    fn target_path(&self, root: &Path, package: &PackageAccumulator, channel: Channel) -> PathBuf {
        let dir = if package.directory.is_empty() {
            root.to_path_buf()
        } else {
            root.join(&package.directory)
        };
        dir.join(channel.file_name(&self.file_prefix))
    }

    /// Fail when two packages would write the same file
    fn check_collisions(&self, root: &Path, packages: &PackageAccumulators) -> Result<()> {
        let mut owners: FxHashMap<PathBuf, &str> = FxHashMap::default();
        for package in packages.iter() {
            for channel in package.active_channels() {
                let path = self.target_path(root, package, channel);
                if let Some(other) = owners.insert(path.clone(), package.package_name.as_str()) {
                    return Err(HandlergenError::synthesis(format!(
                        "packages {} and {} both generate {}",
                        other,
                        package.package_name,
                        path.display()
                    ))
                    .with_file(path.display().to_string()));
                }
            }
        }
        Ok(())
    }

    /// Generate every file, in package then channel order
    pub fn synthesize(&self, root: &Path, packages: &PackageAccumulators) -> Result<Vec<GeneratedFile>> {
        self.check_collisions(root, packages)?;

        let mut files = Vec::new();
        for package in packages.iter() {
            for channel in package.active_channels() {
                let file = self.synthesize_channel(root, package, channel)?;
                if self.dry_run {
                    debug!(path = %file.path.display(), "Dry run; not writing");
                } else {
                    fs::write(&file.path, &file.contents).map_err(|e| {
                        HandlergenError::io(format!("failed to write generated file: {}", e))
                            .with_file(file.path.display().to_string())
                            .with_source(e)
                    })?;
                    info!(
                        path = %file.path.display(),
                        package = %file.package_name,
                        channel = %channel,
                        registrations = file.registrations,
                        "Generated file written"
                    );
                }
                files.push(file);
            }
        }

        Ok(files)
    }

    fn synthesize_channel(
        &self,
        root: &Path,
        package: &PackageAccumulator,
        channel: Channel,
    ) -> Result<GeneratedFile> {
        let acc = package.channel(channel);
        let path = self.target_path(root, package, channel);
        let rendered = render_channel_file(&package.package_name, acc, self.schema(channel));

        let contents = self
            .formatter
            .format(&rendered, &path.display().to_string())
            .map_err(|e| {
                let message = format!("package {}: {}", package.package_name, e.message);
                HandlergenError { message, ..e }
            })?;

        Ok(GeneratedFile {
            package_name: package.package_name.clone(),
            directory: package.directory.clone(),
            channel,
            path,
            contents,
            registrations: acc.keys().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::codegen::infrastructure::BuiltinGoFormatter;
    use crate::shared::models::ErrorKind;
    use tempfile::TempDir;

    const FW: &str = "framework/common/net_fw";

    fn synthesizer() -> CodeSynthesizer {
        CodeSynthesizer::new(Box::new(BuiltinGoFormatter::new()), &FrameworkMarkers::default())
    }

    fn packages_with(entries: &[(&str, &str, Channel)]) -> PackageAccumulators {
        let mut packages = PackageAccumulators::new();
        for (name, dir, channel) in entries {
            let record = packages
                .get_or_insert(name, dir, FW)
                .channel_mut(*channel)
                .ensure_record("aFoo");
            record.set("api", "Foo");
            record.set("api_method", "Foo");
        }
        packages
    }

    struct RejectingFormatter;

    impl SourceFormatter for RejectingFormatter {
        fn format(&self, _source: &str, filename: &str) -> Result<String> {
            Err(HandlergenError::synthesis("rejected").with_file(filename))
        }

        fn name(&self) -> &'static str {
            "rejecting"
        }
    }

    #[test]
    fn test_writes_one_file_per_active_channel() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("api")).unwrap();
        let packages = packages_with(&[("api", "api", Channel::Http), ("api", "api", Channel::Udp)]);

        let files = synthesizer().synthesize(dir.path(), &packages).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, dir.path().join("api/gen_http_api_handler.go"));
        assert_eq!(files[1].path, dir.path().join("api/gen_udp_api_handler.go"));
        assert!(files[0].path.exists());
        assert!(!dir.path().join("api/gen_tcp_api_handler.go").exists());
        let written = fs::read_to_string(&files[1].path).unwrap();
        assert_eq!(written, files[1].contents);
        assert!(written.contains("\tnet_fw.NewKcpNetHandler(-1, Foo, \"Foo\", nil, false)\n"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let packages = packages_with(&[("api", "", Channel::Tcp)]);

        let files = synthesizer()
            .with_dry_run(true)
            .with_file_prefix("zz_")
            .synthesize(dir.path(), &packages)
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, dir.path().join("zz_tcp_api_handler.go"));
        assert!(!files[0].path.exists());
    }

    #[test]
    fn test_collision_detected_before_writing() {
        let dir = TempDir::new().unwrap();
        let packages = packages_with(&[
            ("api", "", Channel::Http),
            ("api_test", "", Channel::Http),
        ]);

        let err = synthesizer().synthesize(dir.path(), &packages).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Synthesis);
        assert!(!dir.path().join("gen_http_api_handler.go").exists());
    }

    #[test]
    fn test_formatter_rejection_is_fatal() {
        let dir = TempDir::new().unwrap();
        let packages = packages_with(&[("api", "", Channel::Http)]);
        let synthesizer =
            CodeSynthesizer::new(Box::new(RejectingFormatter), &FrameworkMarkers::default());

        let err = synthesizer.synthesize(dir.path(), &packages).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Synthesis);
        assert!(err.message.contains("package api"));
        assert!(!dir.path().join("gen_http_api_handler.go").exists());
    }
}
