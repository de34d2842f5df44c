//! Configuration for the cell formatting bridge.
//!
//! Configuration is written in TOML. Every field is optional:
//!
//! ```toml
//! [channel]
//! request_kind = "gofmt_request"
//!
//! [action]
//! prefix = "lgo-kernel"
//! name = "format-code"
//! label = "Format Go"
//! icon = "fa-align-left"
//!
//! [backend]
//! command = "my-formatter"
//! args = ["--stdio"]
//! ```
//!
//! The default location is `$XDG_CONFIG_HOME/cellfmt/config.toml`
//! (or the platform equivalent reported by [`dirs::config_dir`]).

pub mod error;

use std::path::{Path, PathBuf};

use cellfmt_protocol::FORMAT_REQUEST_KIND;
pub use error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Parsed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Request channel settings.
	pub channel: ChannelConfig,
	/// Toolbar action settings.
	pub action: ActionConfig,
	/// Formatter backend process.
	pub backend: BackendConfig,
}

/// Request channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelConfig {
	/// Kind under which format requests are sent.
	pub request_kind: String,
}

impl Default for ChannelConfig {
	fn default() -> Self {
		Self {
			request_kind: FORMAT_REQUEST_KIND.to_string(),
		}
	}
}

/// Toolbar action settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionConfig {
	/// Namespace the action is registered under.
	pub prefix: String,
	/// Action name within the namespace.
	pub name: String,
	/// Human-readable label.
	pub label: String,
	/// Icon hint for toolbar buttons.
	pub icon: String,
}

impl Default for ActionConfig {
	fn default() -> Self {
		Self {
			prefix: "lgo-kernel".to_string(),
			name: "format-code".to_string(),
			label: "Format Go".to_string(),
			icon: "fa-align-left".to_string(),
		}
	}
}

impl ActionConfig {
	/// Fully qualified action name, `<prefix>:<name>`.
	pub fn full_name(&self) -> String {
		format!("{}:{}", self.prefix, self.name)
	}
}

/// Formatter backend process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
	/// Executable speaking the formatting protocol on stdin/stdout.
	pub command: Option<String>,
	/// Arguments passed to `command`.
	pub args: Vec<String>,
}

impl Config {
	/// Parses and validates configuration text.
	pub fn parse(text: &str) -> Result<Self> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Loads configuration from `path`. The file must exist.
	pub fn load(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(&text)
	}

	/// Loads configuration from [`Config::default_path`], falling back to
	/// defaults when no file is present there.
	pub fn load_default() -> Result<Self> {
		match Self::default_path() {
			Some(path) if path.is_file() => Self::load(&path),
			_ => Ok(Self::default()),
		}
	}

	/// Default configuration file location.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("cellfmt").join("config.toml"))
	}

	/// Checks values that deserialize fine but cannot be used.
	pub fn validate(&self) -> Result<()> {
		let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

		if self.channel.request_kind.trim().is_empty() {
			return invalid("channel.request_kind", "must not be empty");
		}
		if self.action.prefix.is_empty() {
			return invalid("action.prefix", "must not be empty");
		}
		if self.action.prefix.contains(':') {
			return invalid("action.prefix", "must not contain ':'");
		}
		if self.action.name.is_empty() {
			return invalid("action.name", "must not be empty");
		}
		if self.backend.command.as_deref().is_some_and(|c| c.trim().is_empty()) {
			return invalid("backend.command", "must not be empty");
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
