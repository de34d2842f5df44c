//! Buffer-to-backend format dispatch.

use std::sync::Arc;

use cellfmt_protocol::{FORMAT_REQUEST_KIND, FormatReply, FormatRequest};
use cellfmt_rpc::RequestChannel;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::buffer::{Buffer, BufferSource};
use crate::report::{FailureReporter, FormatFailure, NoOpReporter, SharedReporter};

/// Sends selected buffers to a formatting backend and applies the replies.
///
/// Every request is independent: its reply callback owns a handle to the one
/// buffer it was built from, so replies may arrive in any order, interleaved
/// with replies of later invocations, without touching other buffers.
pub struct FormatDispatcher<S, C> {
	source: S,
	channel: C,
	request_kind: String,
	reporter: SharedReporter,
}

impl<S, C> std::fmt::Debug for FormatDispatcher<S, C> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FormatDispatcher")
			.field("request_kind", &self.request_kind)
			.finish_non_exhaustive()
	}
}

impl<S: BufferSource, C: RequestChannel> FormatDispatcher<S, C> {
	/// Creates a dispatcher sending `gofmt_request`s over `channel`.
	pub fn new(source: S, channel: C) -> Self {
		Self {
			source,
			channel,
			request_kind: FORMAT_REQUEST_KIND.to_string(),
			reporter: Arc::new(NoOpReporter),
		}
	}

	/// Overrides the request kind.
	#[must_use]
	pub fn with_request_kind(mut self, kind: impl Into<String>) -> Self {
		self.request_kind = kind.into();
		self
	}

	/// Routes failures to `reporter` in addition to the log.
	#[must_use]
	pub fn with_reporter(mut self, reporter: SharedReporter) -> Self {
		self.reporter = reporter;
		self
	}

	/// Request kind used for every request.
	pub fn request_kind(&self) -> &str {
		&self.request_kind
	}

	/// Sends one format request per selected buffer.
	///
	/// Returns the number of requests issued. Never blocks on replies and never
	/// fails; each buffer's outcome is handled by its own reply callback.
	pub fn format_selection(&self) -> usize {
		let buffers = self.source.selected_buffers();
		if buffers.is_empty() {
			debug!("format.selection.empty");
			return 0;
		}

		let issued = buffers.len();
		for buffer in buffers {
			self.dispatch(buffer);
		}
		issued
	}

	/// Issues the request for one buffer.
	fn dispatch(&self, buffer: Arc<dyn Buffer>) {
		let request = FormatRequest::new(buffer.text());
		debug!(buffer = %buffer.label(), bytes = request.code.len(), kind = %self.request_kind, "format.request.sent");

		let reporter = Arc::clone(&self.reporter);
		self.channel.send(
			&self.request_kind,
			request.into_payload(),
			Box::new(move |reply| apply_reply(buffer.as_ref(), reply.as_ref(), reporter.as_ref())),
		);
	}
}

/// Applies one reply to the buffer whose request it answers.
///
/// The buffer is written only on success, with a single `set_text`.
pub(crate) fn apply_reply(buffer: &dyn Buffer, reply: Option<&JsonValue>, reporter: &dyn FailureReporter) {
	match FormatReply::classify(reply) {
		Ok(code) => {
			debug!(buffer = %buffer.label(), bytes = code.len(), "format.reply.applied");
			buffer.set_text(code);
		}
		Err(error) => {
			let label = buffer.label();
			warn!(buffer = %label, %error, "format.reply.failed");
			reporter.report(FormatFailure { buffer: label, error });
		}
	}
}
