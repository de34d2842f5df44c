//! Message envelope used on raw transports.
//!
//! Requests and replies are wrapped as
//! `{ "header": {...}, "parent_header": {...}, "content": ... }`. A reply names
//! the request it answers through `parent_header.msg_id`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Header identifying one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
	/// Unique message identifier.
	pub msg_id: String,
	/// Message kind, e.g. `gofmt_request`.
	pub msg_type: String,
	/// Session that produced the message.
	#[serde(default)]
	pub session: String,
}

/// Header of the message being answered; empty on requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentHeader {
	/// Identifier of the answered request.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub msg_id: Option<String>,
	/// Kind of the answered request.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub msg_type: Option<String>,
}

/// A request or reply as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
	/// Header of this message.
	pub header: Header,
	/// Header of the request this message answers.
	#[serde(default)]
	pub parent_header: ParentHeader,
	/// Message payload.
	#[serde(default)]
	pub content: JsonValue,
}

impl Envelope {
	/// Builds a request envelope.
	pub fn request(msg_id: String, msg_type: &str, session: &str, content: JsonValue) -> Self {
		Self {
			header: Header {
				msg_id,
				msg_type: msg_type.to_string(),
				session: session.to_string(),
			},
			parent_header: ParentHeader::default(),
			content,
		}
	}

	/// Builds the reply envelope answering `self`.
	pub fn reply_to(&self, msg_id: String, content: JsonValue) -> Self {
		Self {
			header: Header {
				msg_id,
				msg_type: reply_kind(&self.header.msg_type),
				session: self.header.session.clone(),
			},
			parent_header: ParentHeader {
				msg_id: Some(self.header.msg_id.clone()),
				msg_type: Some(self.header.msg_type.clone()),
			},
			content,
		}
	}

	/// Identifier of the request this message answers, if it is a reply.
	pub fn answers(&self) -> Option<&str> {
		self.parent_header.msg_id.as_deref()
	}

	/// Returns true if this message is a reply.
	pub fn is_reply(&self) -> bool {
		self.answers().is_some()
	}

	/// Converts the envelope into the JSON object handed to reply callbacks.
	pub fn into_value(self) -> JsonValue {
		serde_json::to_value(self).unwrap_or(JsonValue::Null)
	}
}

/// Reply kind paired with a request kind (`gofmt_request` -> `gofmt_reply`).
pub fn reply_kind(request_kind: &str) -> String {
	match request_kind.strip_suffix("_request") {
		Some(stem) => format!("{stem}_reply"),
		None => format!("{request_kind}_reply"),
	}
}
