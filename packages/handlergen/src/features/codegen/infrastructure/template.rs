//! Generated file template
//!
//! Layout of every generated file:
//!
//! ```text
//! // Code generated by handlergen. DO NOT EDIT.
//! /* directive usage for the channel */
//!
//! package <name>
//!
//! import ( <sorted imports> )
//!
//! func init() { <one constructor call per handler key> }
//! ```

use std::fmt::Write as _;

use crate::features::annotation::domain::{Channel, ChannelAccumulator};
use crate::features::codegen::domain::ChannelSchema;

pub const GENERATED_HEADER: &str = "// Code generated by handlergen from @Handler directives. DO NOT EDIT.";

const HTTP_USAGE: &str = r#"/*
API registration
@Handler(type="api", net="http", path="/reg", bodyLimit=n, resp="object", validation="token", dataPtrStruct="path|pkg.Struct", bodyType=n)
net = "http/tcp/udp": selects the generated file
path = "/xxx": request path
bodyLimit = n: request body limit in KB, 0 = server default
resp = "object": the returned object is serialized
validation = "token" / "user": token validation, or require a user value; omitted = no validation
dataPtrStruct = "path|pkg.Struct": path = import path, pkg.Struct = request body type

Access limit
@Handler(type="valid.limit", pkg="", func="")
pkg = import path: xxx/xxx
func = validator: xxx.xxx

Upload file header check
@Handler(type="valid.file", pkg="", func="", headsize=n)
pkg = import path: xxx/xxx
func = validator: xxx.xxx
headsize = checked header size: body[:headsize]
*/"#;

const TCP_UDP_USAGE: &str = r#"/*
API registration
@Handler(type="api", net="NET", msgId="path|pkg.id", dataPtrStruct="path|pkg.Struct", validation="user")
net = "http/tcp/udp": selects the generated file
msgId = "path|pkg.id" or "id": path = import path, pkg.id = message id
dataPtrStruct = "path|pkg.Struct": path = import path, pkg.Struct = decoded message type
validation = "user": require a user value on the connection
*/"#;

fn usage(channel: Channel) -> String {
    match channel {
        Channel::Http => HTTP_USAGE.to_string(),
        Channel::Tcp | Channel::Udp => TCP_UDP_USAGE.replace("NET", channel.as_str()),
    }
}

/// Render one channel file of a package (unformatted)
pub fn render_channel_file(
    package_name: &str,
    acc: &ChannelAccumulator,
    schema: &ChannelSchema,
) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", GENERATED_HEADER);
    let _ = writeln!(out, "{}", usage(schema.channel));
    let _ = writeln!(out);
    let _ = writeln!(out, "package {}", package_name);
    let _ = writeln!(out);

    let _ = writeln!(out, "import (");
    for import in acc.imports() {
        let _ = writeln!(out, "\t{}", import);
    }
    let _ = writeln!(out, ")");
    let _ = writeln!(out);

    let _ = writeln!(out, "func init() {{");
    for (_, record) in acc.records_in_order() {
        let _ = writeln!(out, "\t{}", schema.render_call(record));
    }
    let _ = writeln!(out, "}}");

    out
}
