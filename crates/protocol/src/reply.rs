//! Reply payloads and their classification.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Reason a reply did not yield formatted code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplyError {
	/// No reply was delivered for the request.
	#[error("no reply received")]
	Absent,
	/// The reply body is not a JSON object.
	#[error("reply is not an object")]
	NotAnObject,
	/// The reply has no `content` object.
	#[error("reply has no content")]
	MissingContent,
	/// The reply content has no string `status`.
	#[error("reply content has no status")]
	MissingStatus,
	/// The backend reported success but sent no `code`.
	#[error("reply status is ok but carries no code")]
	MissingCode,
	/// The backend reported a failure.
	#[error("formatter reported {status}{}", describe_error(.ename, .evalue))]
	Status {
		/// Reported status, anything but `ok`.
		status: String,
		/// Error name, when the backend sent one.
		ename: Option<String>,
		/// Error message, when the backend sent one.
		evalue: Option<String>,
	},
}

fn describe_error(ename: &Option<String>, evalue: &Option<String>) -> String {
	match (ename, evalue) {
		(Some(name), Some(value)) => format!(": {name}: {value}"),
		(Some(name), None) => format!(": {name}"),
		(None, Some(value)) => format!(": {value}"),
		(None, None) => String::new(),
	}
}

/// Status field of a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyStatus {
	/// Formatting succeeded.
	Ok,
	/// Any other reported status (`error`, `fail`, ...).
	Other(String),
}

impl ReplyStatus {
	/// Parses a wire status string.
	pub fn parse(status: &str) -> Self {
		match status {
			"ok" => Self::Ok,
			other => Self::Other(other.to_string()),
		}
	}

	/// Returns the wire representation.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Ok => "ok",
			Self::Other(status) => status,
		}
	}
}

/// Typed `content` of a format reply.
///
/// `ename` and `evalue` follow the error reply convention of notebook kernels
/// and are only meaningful when `status` is not `ok`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatReply {
	/// `"ok"` on success.
	pub status: String,
	/// Formatted code, present on success.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub code: Option<String>,
	/// Error name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ename: Option<String>,
	/// Error message.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub evalue: Option<String>,
}

impl FormatReply {
	/// Builds a successful reply carrying `code`.
	pub fn ok(code: impl Into<String>) -> Self {
		Self {
			status: ReplyStatus::Ok.as_str().to_string(),
			code: Some(code.into()),
			ename: None,
			evalue: None,
		}
	}

	/// Builds an error reply.
	pub fn error(ename: impl Into<String>, evalue: impl Into<String>) -> Self {
		Self {
			status: "error".to_string(),
			code: None,
			ename: Some(ename.into()),
			evalue: Some(evalue.into()),
		}
	}

	/// Parsed status of this reply.
	pub fn status(&self) -> ReplyStatus {
		ReplyStatus::parse(&self.status)
	}

	/// Wraps this content into a reply message body `{ "content": ... }`.
	pub fn into_message(self) -> JsonValue {
		serde_json::json!({ "content": self })
	}

	/// Classifies a raw reply message.
	///
	/// `reply` is the whole message as delivered by the channel; the payload is
	/// read from its `content` field. Returns the formatted code only when the
	/// status is `ok` and `code` is a string. Never panics on unexpected shapes.
	pub fn classify(reply: Option<&JsonValue>) -> Result<String, ReplyError> {
		let reply = reply.ok_or(ReplyError::Absent)?;
		let message = reply.as_object().ok_or(ReplyError::NotAnObject)?;
		let content = message
			.get("content")
			.and_then(JsonValue::as_object)
			.ok_or(ReplyError::MissingContent)?;
		let status = content
			.get("status")
			.and_then(JsonValue::as_str)
			.ok_or(ReplyError::MissingStatus)?;

		let text_field = |key: &str| content.get(key).and_then(JsonValue::as_str).map(str::to_string);

		match ReplyStatus::parse(status) {
			ReplyStatus::Ok => text_field("code").ok_or(ReplyError::MissingCode),
			ReplyStatus::Other(status) => Err(ReplyError::Status {
				status,
				ename: text_field("ename"),
				evalue: text_field("evalue"),
			}),
		}
	}
}
