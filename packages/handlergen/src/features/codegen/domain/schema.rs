//! Channel column schemas
//!
//! A schema is the ordered list of positional constructor arguments for one
//! channel. Each column names the record field it reads, the literal written
//! when the field is absent, and how a present value is rendered.

use crate::features::annotation::domain::{Channel, FrameworkMarkers, RegistrationRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    /// Value is already a Go expression
    Verbatim,
    /// Value is wrapped in double quotes
    Quoted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub default: String,
    pub rule: FormatRule,
}

impl ColumnSpec {
    fn verbatim(field: &'static str, default: impl Into<String>) -> Self {
        Self {
            field,
            default: default.into(),
            rule: FormatRule::Verbatim,
        }
    }

    fn quoted(field: &'static str, default: impl Into<String>) -> Self {
        Self {
            field,
            default: default.into(),
            rule: FormatRule::Quoted,
        }
    }

    /// Argument text for this column; empty values fall back to the default
    pub fn render(&self, record: &RegistrationRecord) -> String {
        match record.get(self.field).filter(|v| !v.is_empty()) {
            None => self.default.clone(),
            Some(value) => match self.rule {
                FormatRule::Verbatim => value.to_string(),
                FormatRule::Quoted => format!("\"{}\"", value),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSchema {
    pub channel: Channel,

    /// Qualified constructor, e.g. `net_fw.NewHtNetHandler`
    pub constructor: String,

    pub columns: Vec<ColumnSpec>,
}

impl ChannelSchema {
    pub fn for_channel(channel: Channel, markers: &FrameworkMarkers) -> Self {
        match channel {
            Channel::Http => Self::http(markers),
            Channel::Tcp | Channel::Udp => Self::tcp_udp(channel, markers),
        }
    }

    /// `net, path, resp, validation, bodyLimit, api, api_method, valid.limit,
    /// valid.file, dataPtrStruct, bodyType`
    pub fn http(markers: &FrameworkMarkers) -> Self {
        Self {
            channel: Channel::Http,
            constructor: markers.constructor(Channel::Http),
            columns: vec![
                ColumnSpec::verbatim("net", markers.http_net()),
                ColumnSpec::verbatim("path", "\"\""),
                ColumnSpec::verbatim("resp", "false"),
                ColumnSpec::verbatim("validation", markers.validation_none()),
                ColumnSpec::verbatim("bodyLimit", "0"),
                ColumnSpec::verbatim("api", "nil"),
                ColumnSpec::quoted("api_method", "\"\""),
                ColumnSpec::verbatim("valid.limit", "nil"),
                ColumnSpec::verbatim("valid.file", "nil"),
                ColumnSpec::verbatim("dataPtrStruct", "nil"),
                ColumnSpec::verbatim("bodyType", "0"),
            ],
        }
    }

    /// `msgId, api, api_method, dataPtrStruct, validation`
    pub fn tcp_udp(channel: Channel, markers: &FrameworkMarkers) -> Self {
        Self {
            channel,
            constructor: markers.constructor(channel),
            columns: vec![
                ColumnSpec::verbatim("msgId", "-1"),
                ColumnSpec::verbatim("api", "nil"),
                ColumnSpec::quoted("api_method", "\"\""),
                ColumnSpec::verbatim("dataPtrStruct", "nil"),
                ColumnSpec::verbatim("validation", "false"),
            ],
        }
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.field).collect()
    }

    /// One positional constructor call
    pub fn render_call(&self, record: &RegistrationRecord) -> String {
        let args: Vec<String> = self.columns.iter().map(|c| c.render(record)).collect();
        format!("{}({})", self.constructor, args.join(", "))
    }
}
