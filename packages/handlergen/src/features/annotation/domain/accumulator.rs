//! Per-package, per-channel registration state
//!
//! Threaded explicitly through interpretation. A handler key enters a
//! channel's key list exactly once, on first sight; later directives for the
//! same key only update its record.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::channel::Channel;

/// Field map for one handler key in one channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationRecord {
    fields: FxHashMap<String, String>,
}

impl RegistrationRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn set_if_absent(&mut self, field: &str, value: &str) {
        if !self.fields.contains_key(field) {
            self.fields.insert(field.to_string(), value.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ChannelAccumulator {
    /// Quoted import paths, sorted and deduplicated
    imports: BTreeSet<String>,
    records: FxHashMap<String, RegistrationRecord>,
    order: Vec<String>,
}

impl ChannelAccumulator {
    /// Empty channel whose import set is seeded with the framework import
    pub fn new(framework_import: &str) -> Self {
        let mut acc = Self::default();
        acc.add_import(framework_import);
        acc
    }

    /// Register an import path (quotes optional)
    pub fn add_import(&mut self, path: &str) {
        let path = path.trim().trim_matches('"');
        if !path.is_empty() {
            self.imports.insert(format!("\"{}\"", path));
        }
    }

    /// Record for `key`, created and appended to the key list on first sight
    pub fn ensure_record(&mut self, key: &str) -> &mut RegistrationRecord {
        if !self.records.contains_key(key) {
            self.order.push(key.to_string());
        }
        self.records.entry(key.to_string()).or_default()
    }

    pub fn record(&self, key: &str) -> Option<&RegistrationRecord> {
        self.records.get(key)
    }

    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    pub fn keys(&self) -> &[String] {
        &self.order
    }

    /// Records in insertion order
    pub fn records_in_order(&self) -> impl Iterator<Item = (&str, &RegistrationRecord)> {
        self.order
            .iter()
            .filter_map(move |key| self.records.get(key).map(|r| (key.as_str(), r)))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Everything one Go package contributes to generation
#[derive(Debug, Clone, Serialize)]
pub struct PackageAccumulator {
    pub package_name: String,

    /// Package directory relative to the input root
    pub directory: String,

    channels: [ChannelAccumulator; 3],
}

impl PackageAccumulator {
    pub fn new(
        package_name: impl Into<String>,
        directory: impl Into<String>,
        framework_import: &str,
    ) -> Self {
        Self {
            package_name: package_name.into(),
            directory: directory.into(),
            channels: [
                ChannelAccumulator::new(framework_import),
                ChannelAccumulator::new(framework_import),
                ChannelAccumulator::new(framework_import),
            ],
        }
    }

    pub fn channel(&self, channel: Channel) -> &ChannelAccumulator {
        &self.channels[channel.index()]
    }

    pub fn channel_mut(&mut self, channel: Channel) -> &mut ChannelAccumulator {
        &mut self.channels[channel.index()]
    }

    /// Channels with at least one registration, in rendering order
    pub fn active_channels(&self) -> impl Iterator<Item = Channel> + '_ {
        Channel::ALL
            .into_iter()
            .filter(move |c| !self.channel(*c).is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.channels.iter().all(ChannelAccumulator::is_empty)
    }
}

/// Package accumulators in first-seen order, keyed by (directory, package name)
#[derive(Debug, Clone, Default, Serialize)]
pub struct PackageAccumulators {
    packages: Vec<PackageAccumulator>,

    #[serde(skip)]
    index: FxHashMap<(String, String), usize>,
}

impl PackageAccumulators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_insert(
        &mut self,
        package_name: &str,
        directory: &str,
        framework_import: &str,
    ) -> &mut PackageAccumulator {
        let key = (directory.to_string(), package_name.to_string());
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                self.packages
                    .push(PackageAccumulator::new(package_name, directory, framework_import));
                let idx = self.packages.len() - 1;
                self.index.insert(key, idx);
                idx
            }
        };
        &mut self.packages[idx]
    }

    pub fn get(&self, package_name: &str, directory: &str) -> Option<&PackageAccumulator> {
        self.index
            .get(&(directory.to_string(), package_name.to_string()))
            .and_then(|&idx| self.packages.get(idx))
    }

    /// Keep only packages with the given name
    pub fn iter(&self) -> impl Iterator<Item = &PackageAccumulator> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
