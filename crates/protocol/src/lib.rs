//! Wire payloads exchanged with a code formatting backend.
//!
//! The formatting backend speaks a tiny request/reply protocol:
//! * [`FormatRequest`]: `{ "code": "..." }`, the full text of one buffer.
//! * [`FormatReply`]: the `content` of a reply, `{ "status": "ok", "code": "..." }`
//!   on success.
//! * [`Envelope`]: header/parent-header wrapper that correlates a reply with
//!   the request it answers when the channel runs over a raw byte stream.
//!
//! Replies arrive as untyped JSON because the backend is not trusted to send
//! well-formed messages. [`FormatReply::classify`] turns a raw reply into the
//! formatted text or a [`ReplyError`] describing what was wrong with it.

#![warn(missing_docs)]

mod envelope;
mod reply;


pub use envelope::{Envelope, Header, ParentHeader, reply_kind};
pub use reply::{FormatReply, ReplyError, ReplyStatus};
use serde::{Deserialize, Serialize};

/// Request kind under which format requests are sent.
pub const FORMAT_REQUEST_KIND: &str = "gofmt_request";

/// Payload of a format request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRequest {
	/// Full source text of the buffer to format.
	pub code: String,
}

impl FormatRequest {
	/// Creates a request carrying `code`.
	pub fn new(code: impl Into<String>) -> Self {
		Self { code: code.into() }
	}

	/// Converts the request into the payload handed to a request channel.
	pub fn into_payload(self) -> serde_json::Value {
		serde_json::json!({ "code": self.code })
	}
}
