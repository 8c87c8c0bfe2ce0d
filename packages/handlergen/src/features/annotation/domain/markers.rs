//! Framework identifiers written into generated code
//!
//! All markers are qualified by the short name of the framework import
//! (`net_fw` for `framework/common/net_fw`).

use super::channel::Channel;

/// Directive prefix recognized in doc comments
pub const HANDLER_MARKER: &str = "@Handler";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkMarkers {
    alias: String,
}

impl FrameworkMarkers {
    /// Markers for a framework import path; the alias is its last segment
    pub fn for_import(import_path: &str) -> Self {
        let alias = import_path
            .trim_matches('"')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self { alias }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn http_net(&self) -> String {
        format!("{}.HTNET_type_http", self.alias)
    }

    pub fn validation_token(&self) -> String {
        format!("{}.Validation_type_token", self.alias)
    }

    pub fn validation_none(&self) -> String {
        format!("{}.Validation_type_none", self.alias)
    }

    /// Handler constructor for a channel
    pub fn constructor(&self, channel: Channel) -> String {
        let name = match channel {
            Channel::Http => "NewHtNetHandler",
            Channel::Tcp => "NewTcpNetHandler",
            Channel::Udp => "NewKcpNetHandler",
        };
        format!("{}.{}", self.alias, name)
    }
}

impl Default for FrameworkMarkers {
    fn default() -> Self {
        Self::for_import("framework/common/net_fw")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_use_import_alias() {
        let markers = FrameworkMarkers::default();
        assert_eq!(markers.alias(), "net_fw");
        assert_eq!(markers.http_net(), "net_fw.HTNET_type_http");
        assert_eq!(markers.constructor(Channel::Udp), "net_fw.NewKcpNetHandler");

        let custom = FrameworkMarkers::for_import("\"acme/transport\"");
        assert_eq!(custom.validation_none(), "transport.Validation_type_none");
    }
}
