//! Handle for submitting requests to a running [`MainLoop`](crate::MainLoop).

use serde_json::Value as JsonValue;
use tokio::sync::mpsc;
use tracing::warn;

use crate::channel::{OnReply, RequestChannel};
use crate::{Error, Result};

/// Internal event sent from sockets to the main loop.
pub enum MainLoopEvent {
	/// Outgoing request awaiting a reply.
	Request {
		/// Request kind.
		kind: String,
		/// Request payload.
		payload: JsonValue,
		/// Callback receiving the reply.
		on_reply: OnReply,
	},
}

impl std::fmt::Debug for MainLoopEvent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Request { kind, .. } => f.debug_struct("Request").field("kind", kind).finish_non_exhaustive(),
		}
	}
}

/// Cloneable sender half of a main loop.
///
/// The main loop stops accepting requests once every socket is dropped.
#[derive(Debug, Clone)]
pub struct PeerSocket {
	pub(crate) tx: mpsc::UnboundedSender<MainLoopEvent>,
}

impl PeerSocket {
	/// Creates a socket whose main loop is already gone.
	pub fn new_closed() -> Self {
		let (tx, _rx) = mpsc::unbounded_channel();
		Self { tx }
	}

	/// Returns true if the main loop no longer accepts requests.
	pub fn is_closed(&self) -> bool {
		self.tx.is_closed()
	}

	/// Queues a request.
	///
	/// # Errors
	///
	/// Returns [`Error::ServiceStopped`] if the main loop has stopped. The
	/// callback is dropped without being invoked in that case.
	pub fn request(&self, kind: &str, payload: JsonValue, on_reply: OnReply) -> Result<()> {
		self.tx
			.send(MainLoopEvent::Request {
				kind: kind.to_string(),
				payload,
				on_reply,
			})
			.map_err(|_| Error::ServiceStopped)
	}
}

impl RequestChannel for PeerSocket {
	fn send(&self, kind: &str, payload: JsonValue, on_reply: OnReply) {
		if let Err(error) = self.request(kind, payload, on_reply) {
			warn!(kind, %error, "rpc.request.dropped");
		}
	}
}

#[cfg(test)]
mod tests;
