//! Annotation Interpreter
//!
//! Reads `@Handler` directives out of operation doc lines and accumulates
//! registration records per (package, channel).
//!
//! Routing rules:
//! - `api` writes into the channel named by its `net` field.
//! - `valid.limit` / `valid.file` write into the operation's home channel:
//!   the `net` of its first `api` directive, or http when it has none. The
//!   tcp/udp constructors take no validators, so there they are dropped
//!   together with their imports.
//! - `path`, `resp`, `bodyType`, `bodyLimit` and `validation="token"` only
//!   apply to http; `msgId` only to tcp/udp.

use tracing::{debug, warn};

use crate::features::annotation::domain::{
    Channel, ChannelAccumulator, Directive, DirectiveKind, FrameworkMarkers, PackageAccumulators,
};
use crate::features::annotation::infrastructure::{directive_text, parse_directive, unquote};
use crate::features::parsing::domain::{directory_of, Operation, ParsedSources};
use crate::shared::models::{HandlergenError, Result};

pub const DEFAULT_FRAMEWORK_IMPORT: &str = "framework/common/net_fw";
pub const DEFAULT_MULTIPART_IMPORT: &str = "github.com/valyala/fasthttp/zzz/mime/multipart";

#[derive(Debug, Clone)]
pub struct AnnotationInterpreter {
    framework_import: String,
    multipart_import: String,
    markers: FrameworkMarkers,

    /// Only operations of this package are interpreted
    package: Option<String>,
}

impl Default for AnnotationInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMEWORK_IMPORT, DEFAULT_MULTIPART_IMPORT)
    }
}

impl AnnotationInterpreter {
    pub fn new(framework_import: impl Into<String>, multipart_import: impl Into<String>) -> Self {
        let framework_import = framework_import.into();
        Self {
            markers: FrameworkMarkers::for_import(&framework_import),
            framework_import,
            multipart_import: multipart_import.into(),
            package: None,
        }
    }

    pub fn with_package(mut self, package: Option<String>) -> Self {
        self.package = package;
        self
    }

    pub fn markers(&self) -> &FrameworkMarkers {
        &self.markers
    }

    /// Interpret every operation of the model, in model order
    pub fn interpret(&self, sources: &ParsedSources) -> Result<PackageAccumulators> {
        let mut packages = PackageAccumulators::new();
        let mut annotated = 0usize;

        for op in &sources.operations {
            if self.package.as_deref().is_some_and(|p| p != op.package_name) {
                continue;
            }
            let directives = self.collect_directives(op)?;
            if directives.is_empty() {
                continue;
            }
            annotated += 1;

            let package = packages.get_or_insert(
                &op.package_name,
                directory_of(&op.filename),
                &self.framework_import,
            );
            let home = home_channel(op, &directives)?;
            let key = op.handler_key();

            for directive in &directives {
                match directive.kind {
                    DirectiveKind::Api => {
                        let channel = api_channel(op, directive)?;
                        self.apply_api(op, directive, &key, channel, package.channel_mut(channel))?;
                    }
                    DirectiveKind::ValidLimit | DirectiveKind::ValidFile if home != Channel::Http => {
                        warn!(
                            operation = %op.name,
                            file = %op.filename,
                            directive_type = directive.kind.as_str(),
                            channel = %home,
                            "Validator only applies to http; ignored"
                        );
                    }
                    DirectiveKind::ValidLimit => {
                        self.apply_valid_limit(directive, &key, package.channel_mut(home))
                    }
                    DirectiveKind::ValidFile => {
                        self.apply_valid_file(directive, &key, package.channel_mut(home))
                    }
                }
            }
        }

        debug!(
            annotated_operations = annotated,
            packages = packages.len(),
            "Directives interpreted"
        );
        Ok(packages)
    }

    /// Parse all directive lines of an operation; unknown types are dropped
    fn collect_directives(&self, op: &Operation) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();

        for line in &op.doc_lines {
            let Some(text) = directive_text(line) else {
                continue;
            };
            let fields = parse_directive(text).map_err(|e| {
                directive_error(op, format!("{} in `{}`", e, text)).with_source(e)
            })?;

            let type_value = fields
                .iter()
                .find(|(k, _)| k == "type")
                .map(|(_, v)| unquote(v))
                .unwrap_or_default();
            let Some(kind) = DirectiveKind::from_type(type_value) else {
                debug!(operation = %op.name, file = %op.filename, directive_type = type_value, "Ignoring directive type");
                continue;
            };

            directives.push(Directive {
                kind,
                fields: fields.into_iter().filter(|(k, _)| k != "type").collect(),
                text: text.to_string(),
            });
        }

        Ok(directives)
    }

    fn apply_api(
        &self,
        op: &Operation,
        directive: &Directive,
        key: &str,
        channel: Channel,
        acc: &mut ChannelAccumulator,
    ) -> Result<()> {
        let mut imports: Vec<String> = Vec::new();
        let record = acc.ensure_record(key);
        record.set_if_absent("api", &op.name);
        record.set_if_absent("api_method", &op.name);
        if channel == Channel::Http {
            record.set("net", self.markers.http_net());
        }

        for (field, raw) in &directive.fields {
            match field.as_str() {
                "net" => {}
                "path" | "resp" | "bodyType" | "bodyLimit" if channel != Channel::Http => {
                    warn!(operation = %op.name, file = %op.filename, %field, %channel, "Field only applies to http; ignored");
                }
                "path" | "bodyType" | "bodyLimit" => record.set(field.as_str(), raw.as_str()),
                "resp" => {
                    if unquote(raw) == "object" {
                        record.set("resp", "true");
                    }
                }
                "validation" => match unquote(raw) {
                    "token" if channel != Channel::Http => {
                        warn!(operation = %op.name, file = %op.filename, %channel, "validation=\"token\" only applies to http; ignored");
                    }
                    "token" => record.set("validation", self.markers.validation_token()),
                    "user" => record.set("validation", "true"),
                    other => debug!(operation = %op.name, value = other, "Unknown validation; ignored"),
                },
                "dataPtrStruct" => {
                    let value = unquote(raw);
                    if value.is_empty() {
                        continue;
                    }
                    let (path, type_name) = value.split_once('|').ok_or_else(|| {
                        directive_error(
                            op,
                            format!("dataPtrStruct must be \"path|pkg.Type\" in `{}`", directive.text),
                        )
                    })?;
                    imports.push(path.to_string());
                    record.set(
                        "dataPtrStruct",
                        format!("func() any {{ return &{}{{}} }}", type_name.trim()),
                    );
                }
                "msgId" if channel == Channel::Http => {
                    warn!(operation = %op.name, file = %op.filename, "msgId only applies to tcp/udp; ignored");
                }
                "msgId" => {
                    let value = unquote(raw);
                    match value.split_once('|') {
                        Some((path, id)) => {
                            imports.push(path.to_string());
                            record.set("msgId", id.trim());
                        }
                        None if !value.is_empty() => record.set("msgId", value),
                        None => {}
                    }
                }
                other => {
                    debug!(operation = %op.name, field = other, "Unknown api field; ignored");
                }
            }
        }

        for path in imports {
            acc.add_import(&path);
        }
        Ok(())
    }

    fn apply_valid_limit(&self, directive: &Directive, key: &str, acc: &mut ChannelAccumulator) {
        acc.ensure_record(key);
        if let Some(pkg) = directive.get("pkg").filter(|raw| raw.len() > 2) {
            acc.add_import(pkg);
        }
        let func = directive.get("func").map(|raw| raw.replace('"', "")).unwrap_or_default();
        if !func.trim().is_empty() {
            acc.ensure_record(key).set("valid.limit", func.trim());
        }
    }

    fn apply_valid_file(&self, directive: &Directive, key: &str, acc: &mut ChannelAccumulator) {
        acc.ensure_record(key);
        if let Some(pkg) = directive.get("pkg").filter(|raw| raw.len() > 2) {
            acc.add_import(pkg);
        }
        let func = directive.get("func").map(|raw| raw.replace('"', "")).unwrap_or_default();
        let func = func.trim();
        if func.is_empty() {
            return;
        }
        let headsize = directive
            .get("headsize")
            .map(|raw| unquote(raw))
            .filter(|h| !h.is_empty())
            .unwrap_or("0");

        acc.add_import(&self.multipart_import);
        acc.ensure_record(key).set(
            "valid.file",
            format!(
                "&multipart.MyValidHeader{{ValidFormFileFormat: {}, ValidHeadSize: {}}}",
                func, headsize
            ),
        );
    }
}

fn directive_error(op: &Operation, message: String) -> HandlergenError {
    HandlergenError::directive(format!("operation {}: {}", op.name, message))
        .with_file(op.filename.as_str())
        .with_line(op.line)
}

/// Channel named by an api directive's `net` field
fn api_channel(op: &Operation, directive: &Directive) -> Result<Channel> {
    let net = directive
        .get("net")
        .ok_or_else(|| directive_error(op, format!("missing 'net' in `{}`", directive.text)))?;
    Channel::from_literal(net).ok_or_else(|| {
        directive_error(op, format!("unknown net {} in `{}`", net, directive.text))
    })
}

/// Channel that validator directives of this operation write into
fn home_channel(op: &Operation, directives: &[Directive]) -> Result<Channel> {
    match directives.iter().find(|d| d.kind == DirectiveKind::Api) {
        Some(api) => api_channel(op, api),
        None => Ok(Channel::Http),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::domain::ParsedSources;
    use crate::shared::models::ErrorKind;

    fn op(filename: &str, name: &str, docs: &[&str]) -> Operation {
        Operation {
            package_name: "api".to_string(),
            filename: filename.to_string(),
            name: name.to_string(),
            doc_lines: docs.iter().map(|d| d.to_string()).collect(),
            ..Default::default()
        }
    }

    fn interpret(ops: Vec<Operation>) -> Result<PackageAccumulators> {
        let mut sources = ParsedSources::new("/src");
        sources.operations = ops;
        AnnotationInterpreter::default().interpret(&sources)
    }

    #[test]
    fn test_http_api_record() {
        let packages = interpret(vec![op(
            "a",
            "Foo",
            &[r#"// @Handler(type="api", net="http", path="/foo", resp="object", validation="token", bodyLimit=0)"#],
        )])
        .unwrap();

        let http = packages.get("api", "").unwrap().channel(Channel::Http);
        assert_eq!(http.keys(), &["aFoo".to_string()]);
        let record = http.record("aFoo").unwrap();
        assert_eq!(record.get("net"), Some("net_fw.HTNET_type_http"));
        assert_eq!(record.get("path"), Some("\"/foo\""));
        assert_eq!(record.get("resp"), Some("true"));
        assert_eq!(record.get("validation"), Some("net_fw.Validation_type_token"));
        assert_eq!(record.get("bodyLimit"), Some("0"));
        assert_eq!(record.get("api"), Some("Foo"));
        assert_eq!(record.get("api_method"), Some("Foo"));
    }

    #[test]
    fn test_validators_dropped_on_tcp_with_their_imports() {
        let packages = interpret(vec![op(
            "a",
            "Bar",
            &[
                r#"// @Handler(type="valid.limit", pkg="app/limit", func="limit.Check")"#,
                r#"// @Handler(type="api", net="tcp", msgId="7", bodyLimit=64)"#,
                r#"// @Handler(type="valid.file", pkg="app/check", func="check.Image")"#,
            ],
        )])
        .unwrap();

        let package = packages.get("api", "").unwrap();
        assert!(package.channel(Channel::Http).is_empty());
        let tcp = package.channel(Channel::Tcp);
        assert_eq!(tcp.keys().len(), 1);
        let record = tcp.record("aBar").unwrap();
        assert_eq!(record.get("msgId"), Some("7"));
        assert_eq!(record.get("api"), Some("Bar"));
        assert_eq!(record.get("valid.limit"), None);
        assert_eq!(record.get("valid.file"), None);
        assert_eq!(record.get("bodyLimit"), None);
        let imports: Vec<&str> = tcp.imports().collect();
        assert_eq!(imports, vec!["\"framework/common/net_fw\""]);
    }

    #[test]
    fn test_token_validation_only_on_http() {
        let packages = interpret(vec![
            op("a", "T", &[r#"// @Handler(type="api", net="tcp", msgId="1", validation="token")"#]),
            op("a", "U", &[r#"// @Handler(type="api", net="udp", msgId="2", validation="user")"#]),
        ])
        .unwrap();

        let package = packages.get("api", "").unwrap();
        assert_eq!(package.channel(Channel::Tcp).record("aT").unwrap().get("validation"), None);
        assert_eq!(
            package.channel(Channel::Udp).record("aU").unwrap().get("validation"),
            Some("true")
        );
    }

    #[test]
    fn test_package_filter_skips_other_packages_before_parsing() {
        let mut other = op("b", "Bad", &[r#"// @Handler(type="api", net="http)"#]);
        other.package_name = "other".to_string();
        let mut sources = ParsedSources::new("/src");
        sources.operations = vec![
            other,
            op("a", "Good", &[r#"// @Handler(type="api", net="http", path="/g")"#]),
        ];

        let packages = AnnotationInterpreter::default()
            .with_package(Some("api".to_string()))
            .interpret(&sources)
            .unwrap();

        assert_eq!(packages.len(), 1);
        assert!(packages.get("api", "").is_some());
        assert!(packages.get("other", "").is_none());
    }

    #[test]
    fn test_data_ptr_struct_and_msg_id_imports() {
        let packages = interpret(vec![
            op(
                "a",
                "One",
                &[r#"// @Handler(type="api", net="udp", msgId="app/ids|ids.Login", dataPtrStruct="app/model|model.A")"#],
            ),
            op(
                "a",
                "Two",
                &[r#"// @Handler(type="api", net="udp", dataPtrStruct="app/model|model.B", validation="user")"#],
            ),
        ])
        .unwrap();

        let udp = packages.get("api", "").unwrap().channel(Channel::Udp);
        let imports: Vec<&str> = udp.imports().collect();
        assert_eq!(
            imports,
            vec!["\"app/ids\"", "\"app/model\"", "\"framework/common/net_fw\""]
        );
        let one = udp.record("aOne").unwrap();
        assert_eq!(one.get("msgId"), Some("ids.Login"));
        assert_eq!(one.get("dataPtrStruct"), Some("func() any { return &model.A{} }"));
        let two = udp.record("aTwo").unwrap();
        assert_eq!(two.get("dataPtrStruct"), Some("func() any { return &model.B{} }"));
        assert_eq!(two.get("validation"), Some("true"));
    }

    #[test]
    fn test_valid_file_record() {
        let packages = interpret(vec![op(
            "a",
            "Upload",
            &[
                r#"// @Handler(type="api", net="http", path="/up")"#,
                r#"// @Handler(type="valid.file", pkg="app/check", func="check.Image", headsize=8)"#,
            ],
        )])
        .unwrap();

        let http = packages.get("api", "").unwrap().channel(Channel::Http);
        let record = http.record("aUpload").unwrap();
        assert_eq!(
            record.get("valid.file"),
            Some("&multipart.MyValidHeader{ValidFormFileFormat: check.Image, ValidHeadSize: 8}")
        );
        assert!(http
            .imports()
            .any(|i| i == "\"github.com/valyala/fasthttp/zzz/mime/multipart\""));
    }

    #[test]
    fn test_http_only_fields_ignored_on_tcp() {
        let packages = interpret(vec![op(
            "a",
            "Baz",
            &[r#"// @Handler(type="api", net="tcp", path="/x", resp="object", msgId="3")"#],
        )])
        .unwrap();

        let record = packages
            .get("api", "")
            .unwrap()
            .channel(Channel::Tcp)
            .record("aBaz")
            .unwrap();
        assert_eq!(record.get("path"), None);
        assert_eq!(record.get("resp"), None);
        assert_eq!(record.get("net"), None);
    }

    #[test]
    fn test_no_directive_produces_nothing() {
        let packages = interpret(vec![op("a", "Plain", &["// Plain does things"])]).unwrap();
        assert!(packages.is_empty());
    }

    #[test]
    fn test_type_selected_by_substring() {
        let packages = interpret(vec![
            op("a", "X", &[r#"// @Handler(type="route", net="http")"#]),
            op("a", "V2", &[r#"// @Handler(type="api.v2", net="http", path="/s")"#]),
        ])
        .unwrap();

        let http = packages.get("api", "").unwrap().channel(Channel::Http);
        assert_eq!(http.keys(), &["aV2".to_string()]);
        assert_eq!(http.record("aV2").unwrap().get("path"), Some("\"/s\""));
    }

    #[test]
    fn test_malformed_directive_is_fatal() {
        let err = interpret(vec![op("a.go", "Foo", &[r#"// @Handler(type="api", net="http)"#])])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Directive);
        assert_eq!(err.file_path.as_deref(), Some("a.go"));
        assert!(err.message.contains("Foo"));
    }

    #[test]
    fn test_missing_or_unknown_net_is_fatal() {
        let err = interpret(vec![op("a.go", "Foo", &[r#"// @Handler(type="api", path="/x")"#])])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Directive);

        let err = interpret(vec![op("a.go", "Foo", &[r#"// @Handler(type="api", net="quic")"#])])
            .unwrap_err();
        assert!(err.message.contains("quic"));
    }

    #[test]
    fn test_data_ptr_struct_without_separator_is_fatal() {
        let err = interpret(vec![op(
            "a.go",
            "Foo",
            &[r#"// @Handler(type="api", net="http", dataPtrStruct="model.A")"#],
        )])
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Directive);
    }
}
