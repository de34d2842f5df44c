use std::io::Write;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_text_yields_defaults() {
	let config = Config::parse("").unwrap();
	assert_eq!(config, Config::default());
	assert_eq!(config.channel.request_kind, "gofmt_request");
	assert_eq!(config.action.full_name(), "lgo-kernel:format-code");
	assert_eq!(config.action.label, "Format Go");
	assert_eq!(config.action.icon, "fa-align-left");
	assert_eq!(config.backend.command, None);
}

#[test]
fn partial_sections_keep_other_defaults() {
	let config = Config::parse(
		r#"
[action]
label = "Format"

[backend]
command = "fmtd"
args = ["--stdio"]
"#,
	)
	.unwrap();

	assert_eq!(config.action.label, "Format");
	assert_eq!(config.action.prefix, "lgo-kernel");
	assert_eq!(config.backend.command.as_deref(), Some("fmtd"));
	assert_eq!(config.backend.args, vec!["--stdio".to_string()]);
}

#[test]
fn unknown_fields_are_rejected() {
	let err = Config::parse("[channel]\nkind = \"x\"\n").unwrap_err();
	assert!(matches!(err, ConfigError::Parse(_)), "got {err}");
}

#[test]
fn empty_request_kind_is_invalid() {
	let err = Config::parse("[channel]\nrequest_kind = \" \"\n").unwrap_err();
	assert!(matches!(err, ConfigError::Invalid { field: "channel.request_kind", .. }), "got {err}");
}

#[test]
fn prefix_with_separator_is_invalid() {
	let err = Config::parse("[action]\nprefix = \"a:b\"\n").unwrap_err();
	assert!(matches!(err, ConfigError::Invalid { field: "action.prefix", .. }), "got {err}");
}

#[test]
fn blank_backend_command_is_invalid() {
	let err = Config::parse("[backend]\ncommand = \"\"\n").unwrap_err();
	assert!(matches!(err, ConfigError::Invalid { field: "backend.command", .. }), "got {err}");
}

#[test]
fn load_reads_file() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "[action]\nprefix = \"go\"").unwrap();

	let config = Config::load(file.path()).unwrap();
	assert_eq!(config.action.full_name(), "go:format-code");
}

#[test]
fn load_missing_file_reports_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.toml");

	let err = Config::load(&path).unwrap_err();
	match err {
		ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
		other => panic!("expected Io error, got {other}"),
	}
}

#[test]
fn default_path_ends_with_config_file() {
	if let Some(path) = Config::default_path() {
		assert!(path.ends_with("cellfmt/config.toml"));
	}
}
