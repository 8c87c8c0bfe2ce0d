//! Transport channels
//!
//! Each channel owns its own import set, registration records and column
//! schema, and is rendered into its own generated file.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Http,
    Tcp,
    Udp,
}

impl Channel {
    /// Rendering order
    pub const ALL: [Channel; 3] = [Channel::Http, Channel::Tcp, Channel::Udp];

    /// Parse a `net` value, with or without surrounding quotes
    pub fn from_literal(raw: &str) -> Option<Self> {
        match raw.trim().trim_matches('"') {
            "http" => Some(Channel::Http),
            "tcp" => Some(Channel::Tcp),
            "udp" => Some(Channel::Udp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Http => "http",
            Channel::Tcp => "tcp",
            Channel::Udp => "udp",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Channel::Http => 0,
            Channel::Tcp => 1,
            Channel::Udp => 2,
        }
    }

    /// Generated file name, e.g. `gen_http_api_handler.go`
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}{}_api_handler.go", prefix, self.as_str())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
